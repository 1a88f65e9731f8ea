//! # Shared Buffer
//!
//! The byte region both runtimes agree on: the host writes fixed-size
//! records into it, the native side reads them back by offset.
//!
//! The buffer is allocated exactly once per session and never moves or
//! grows afterwards, because the native reader caches the base address.
//! All writes are offset-based and bounds-checked; nothing in this module
//! relies on an underlying platform's implicit bounds safety.

use bytemuck::{bytes_of, Pod};

use crate::error::{MarshalError, MarshalResult};

/// Address and capacity of the allocated region, handed to the native
/// reader once at startup.
///
/// The reader must not assume any relationship between capacity and
/// entity count beyond `capacity / record_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferInfo {
    /// Base address of the region in the shared address space.
    pub base_address: usize,
    /// Total capacity in bytes, fixed for the session.
    pub capacity: usize,
}

/// A fixed-capacity byte region with offset-based, bounds-checked writes.
///
/// # Lifecycle
///
/// Created unallocated, allocated exactly once via [`SharedBuffer::allocate`],
/// owned by the session until process teardown. A second `allocate` call
/// is an error, as is any write before the first.
///
/// # Thread Safety
///
/// NOT thread-safe and not reentrant: a single encode operation owns the
/// full write cursor for its duration. The driver is single-threaded and
/// the native side only reads after the encode call returns.
#[derive(Debug, Default)]
pub struct SharedBuffer {
    storage: Option<Box<[u8]>>,
}

impl SharedBuffer {
    /// Creates a new, unallocated buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { storage: None }
    }

    /// Allocates the backing region. Callable exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::AlreadyAllocated`] on a second call.
    pub fn allocate(&mut self, capacity: usize) -> MarshalResult<BufferInfo> {
        if let Some(existing) = &self.storage {
            return Err(MarshalError::AlreadyAllocated {
                capacity: existing.len(),
            });
        }
        let storage = vec![0u8; capacity].into_boxed_slice();
        let info = BufferInfo {
            base_address: storage.as_ptr() as usize,
            capacity,
        };
        self.storage = Some(storage);
        Ok(info)
    }

    /// Returns true once [`SharedBuffer::allocate`] has succeeded.
    #[inline]
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        self.storage.is_some()
    }

    /// Total capacity in bytes; 0 while unallocated.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().map_or(0, |s| s.len())
    }

    /// Number of whole records of `record_size` bytes the region can hold.
    #[inline]
    #[must_use]
    pub fn record_capacity(&self, record_size: usize) -> usize {
        if record_size == 0 {
            return 0;
        }
        self.capacity() / record_size
    }

    /// Read-only view of the whole region; empty while unallocated.
    ///
    /// This is the same view the native reader has.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_deref().unwrap_or(&[])
    }

    /// Writes raw bytes at `offset`.
    ///
    /// # Errors
    ///
    /// [`MarshalError::NotInitialized`] before allocation,
    /// [`MarshalError::BufferOverflow`] if the write would cross the end.
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> MarshalResult<()> {
        let storage = self.storage.as_mut().ok_or(MarshalError::NotInitialized)?;
        let end = offset
            .checked_add(bytes.len())
            .ok_or(MarshalError::BufferOverflow {
                offset,
                requested: bytes.len(),
                capacity: storage.len(),
            })?;
        if end > storage.len() {
            return Err(MarshalError::BufferOverflow {
                offset,
                requested: bytes.len(),
                capacity: storage.len(),
            });
        }
        storage[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Writes a `u32` in wire byte order at `offset`.
    ///
    /// # Errors
    ///
    /// Same as [`SharedBuffer::write_bytes`].
    #[inline]
    pub fn write_u32(&mut self, offset: usize, value: u32) -> MarshalResult<()> {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an `i32` in wire byte order at `offset`.
    ///
    /// # Errors
    ///
    /// Same as [`SharedBuffer::write_bytes`].
    #[inline]
    pub fn write_i32(&mut self, offset: usize, value: i32) -> MarshalResult<()> {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Writes a Pod value directly at `offset`.
    ///
    /// # Errors
    ///
    /// Same as [`SharedBuffer::write_bytes`].
    #[inline]
    pub fn write_pod<T: Pod>(&mut self, offset: usize, value: &T) -> MarshalResult<()> {
        self.write_bytes(offset, bytes_of(value))
    }
}
