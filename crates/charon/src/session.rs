//! # Session
//!
//! The explicit context object owning everything the crossing needs for
//! one host session: the shared buffer, the type-tag registry, and the
//! capability registry. There is no ambient global state; the external
//! driver holds the one `Session` and calls its entry points each cycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use charon_marshal::{
    BufferInfo, EncodeOutcome, LookValue, MarshalError, PacketEncoder, SharedBuffer,
    TypeTagRegistry,
};
use charon_registry::{CapabilityRegistry, RegistryError};
use thiserror::Error;

use crate::config::SessionConfig;

/// Errors surfaced to the external driver.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An entry point was called before [`Session::initialize`].
    ///
    /// Fatal to the calling entry point; the driver should not retry
    /// until initialization has completed.
    #[error("session used before initialization")]
    NotInitialized,

    /// A marshalling failure other than graceful truncation.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// A capability registry failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One host session's marshalling context.
///
/// Single-threaded, driven by an external fixed-budget scheduler: one
/// invocation window per host cycle, no reentrancy. A second encode must
/// not begin before the first returns, because both would share the one
/// buffer's write cursor.
pub struct Session {
    config: SessionConfig,
    buffer: SharedBuffer,
    tags: TypeTagRegistry,
    registry: CapabilityRegistry,
    /// Cycle of the native side's last check-in. Shared with the
    /// `game::checkIn` capability binding.
    last_check_in: Arc<AtomicU64>,
}

impl Session {
    /// Creates an uninitialized session.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            buffer: SharedBuffer::new(),
            tags: TypeTagRegistry::new(),
            registry: CapabilityRegistry::new(),
            last_check_in: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Allocates the shared buffer and registers the standard entity
    /// kinds. Callable exactly once, at `current_cycle`.
    ///
    /// Kinds registered through [`Session::tags_mut`] beforehand keep
    /// their tags; the standard kinds are merged in after them.
    ///
    /// Returns the `(base_address, capacity)` pair the native reader
    /// caches for the rest of the session.
    ///
    /// # Errors
    ///
    /// [`MarshalError::AlreadyAllocated`] via [`SessionError::Marshal`]
    /// on a second call.
    pub fn initialize(&mut self, current_cycle: u64) -> Result<BufferInfo, SessionError> {
        let info = self.buffer.allocate(self.config.buffer_capacity)?;
        self.tags.register_standard_kinds();
        self.last_check_in.store(current_cycle, Ordering::Relaxed);
        tracing::info!(
            capacity = info.capacity,
            kinds = self.tags.len(),
            "session initialized"
        );
        Ok(info)
    }

    /// True once [`Session::initialize`] has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_allocated()
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only view of the shared buffer (what the native reader sees).
    #[must_use]
    pub const fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// The type-tag registry.
    #[must_use]
    pub const fn tags(&self) -> &TypeTagRegistry {
        &self.tags
    }

    /// Mutable type-tag registry, for registering non-standard kinds.
    pub fn tags_mut(&mut self) -> &mut TypeTagRegistry {
        &mut self.tags
    }

    /// The capability registry.
    #[must_use]
    pub const fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Mutable capability registry, for publishing binding groups.
    pub fn registry_mut(&mut self) -> &mut CapabilityRegistry {
        &mut self.registry
    }

    /// Shared check-in cell, for wiring into capability bindings.
    #[must_use]
    pub(crate) fn check_in_cell(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.last_check_in)
    }

    /// Entry point: encodes one region query's results into the buffer
    /// from offset 0 and returns how many records the native side should
    /// read.
    ///
    /// Truncation is reported in the outcome and logged, never raised;
    /// the host session continues.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotInitialized`] before initialization.
    pub fn query_region(&mut self, values: &[LookValue]) -> Result<EncodeOutcome, SessionError> {
        self.query_projected(values, |value| value)
    }

    /// Entry point: like [`Session::query_region`], but projects each
    /// result row through `extractor` first (keyed positional queries).
    ///
    /// # Errors
    ///
    /// [`SessionError::NotInitialized`] before initialization.
    pub fn query_projected<T>(
        &mut self,
        items: &[T],
        extractor: impl Fn(&T) -> &LookValue,
    ) -> Result<EncodeOutcome, SessionError> {
        if !self.buffer.is_allocated() {
            return Err(SessionError::NotInitialized);
        }
        let mut encoder = PacketEncoder::new(&mut self.buffer, &self.tags)?
            .max_records(self.config.max_records_per_query);
        Ok(encoder.encode_entities_with(items, extractor))
    }

    /// Records a native-side check-in at `cycle`.
    pub fn check_in(&self, cycle: u64) {
        self.last_check_in.store(cycle, Ordering::Relaxed);
    }

    /// Cycles elapsed since the last native check-in.
    #[must_use]
    pub fn cycles_since_check_in(&self, cycle: u64) -> u64 {
        cycle.saturating_sub(self.last_check_in.load(Ordering::Relaxed))
    }

    /// True when the native side has missed enough check-ins that the
    /// driver should halt the host. One cycle before the threshold a
    /// warning is logged, matching the grace the native side gets to
    /// recover.
    #[must_use]
    pub fn should_halt(&self, cycle: u64) -> bool {
        let missed = self.cycles_since_check_in(cycle);
        let threshold = self.config.halt_after_missed_checkins;
        if missed >= threshold {
            return true;
        }
        if threshold > 0 && missed == threshold - 1 {
            tracing::warn!(missed, "no native check-in, halting next cycle");
        }
        false
    }
}
