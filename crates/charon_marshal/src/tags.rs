//! # Type Tag Registry
//!
//! Assigns each registered entity kind the small integer tag the native
//! side uses to pick a concrete wrapper type for a record.
//!
//! Tag 0 is reserved exclusively for "unregistered"; explicit tags start
//! at 1, so a reader can always distinguish "never registered" from a
//! real class.

use std::collections::HashMap;

use crate::entity::EntityKind;

/// Wire tag for entities whose kind was never registered.
pub const UNREGISTERED_TAG: u32 = 0;

/// Maps entity kinds to wire type tags.
#[derive(Debug, Default, Clone)]
pub struct TypeTagRegistry {
    tags: HashMap<EntityKind, u32>,
    next: u32,
}

impl TypeTagRegistry {
    /// Creates an empty registry. The first registered kind gets tag 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
            next: UNREGISTERED_TAG + 1,
        }
    }

    /// Creates a registry with every standard kind registered, in
    /// [`EntityKind::ALL`] order.
    #[must_use]
    pub fn with_standard_kinds() -> Self {
        let mut registry = Self::new();
        registry.register_standard_kinds();
        registry
    }

    /// Registers every standard kind, in [`EntityKind::ALL`] order.
    ///
    /// Kinds already registered keep their existing tags.
    pub fn register_standard_kinds(&mut self) {
        for kind in EntityKind::ALL {
            self.register(kind);
        }
    }

    /// Registers a kind and returns its tag.
    ///
    /// Idempotent: a kind registered twice keeps its original tag.
    pub fn register(&mut self, kind: EntityKind) -> u32 {
        if let Some(&tag) = self.tags.get(&kind) {
            return tag;
        }
        let tag = self.next;
        self.next += 1;
        self.tags.insert(kind, tag);
        tag
    }

    /// Tag of a kind; [`UNREGISTERED_TAG`] when it was never registered.
    #[inline]
    #[must_use]
    pub fn tag_of(&self, kind: EntityKind) -> u32 {
        self.tags.get(&kind).copied().unwrap_or(UNREGISTERED_TAG)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
