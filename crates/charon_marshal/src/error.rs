//! # Marshalling Error Types
//!
//! All errors that can occur while writing into the shared buffer.

use thiserror::Error;

/// Errors that can occur in the marshalling layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// The shared buffer was used before `allocate` was called.
    ///
    /// Fatal to the calling entry point: nothing can be encoded until the
    /// session has allocated the buffer.
    #[error("shared buffer used before allocation")]
    NotInitialized,

    /// `allocate` was called a second time.
    ///
    /// The buffer's capacity is fixed for the life of the session and the
    /// native side caches the base address, so reallocation is forbidden.
    #[error("shared buffer already allocated ({capacity} bytes)")]
    AlreadyAllocated {
        /// Capacity of the existing allocation.
        capacity: usize,
    },

    /// A raw write would have crossed the end of the buffer.
    ///
    /// At the encoder level this is handled as graceful truncation; it
    /// only surfaces as an error from the low-level write primitives.
    #[error("write of {requested} bytes at offset {offset} exceeds capacity {capacity}")]
    BufferOverflow {
        /// Offset the write started at.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Total buffer capacity.
        capacity: usize,
    },
}

/// Result type for marshalling operations.
pub type MarshalResult<T> = Result<T, MarshalError>;
