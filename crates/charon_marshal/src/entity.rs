//! # Entity Model
//!
//! The host-side view of a world object, shaped for marshalling.
//!
//! The source object graph is polymorphic and duck-typed; here every
//! entity is an explicit [`Entity`] value and every positional query
//! result is an explicit [`LookValue`] tagged union. The encoder matches
//! on discriminants exhaustively instead of probing for conventionally
//! named fields.
//!
//! Vitals are `Option` pairs so "field absent" and "field legitimately
//! zero" stay distinguishable all the way to the wire.

/// Kinds of entity the marshaller can transfer.
///
/// The order here is not a wire contract; wire tags come from the
/// [`crate::tags::TypeTagRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A mobile unit.
    Creep,
    /// A spawn structure.
    Spawn,
    /// An energy extension.
    Extension,
    /// A defensive tower.
    Tower,
    /// A bulk store structure.
    Storage,
    /// A small store structure.
    Container,
    /// A road.
    Road,
    /// A defensive wall.
    Wall,
    /// A region controller.
    Controller,
    /// An energy source.
    Source,
    /// A mineral deposit node.
    Mineral,
    /// A harvestable deposit.
    Deposit,
    /// A structure under construction.
    ConstructionSite,
    /// A dropped resource pile.
    Resource,
    /// Remains of a dead creep.
    Tombstone,
    /// Remains of a destroyed structure.
    Ruin,
}

impl EntityKind {
    /// Every kind, in registration order for
    /// [`crate::tags::TypeTagRegistry::with_standard_kinds`].
    pub const ALL: [Self; 16] = [
        Self::Creep,
        Self::Spawn,
        Self::Extension,
        Self::Tower,
        Self::Storage,
        Self::Container,
        Self::Road,
        Self::Wall,
        Self::Controller,
        Self::Source,
        Self::Mineral,
        Self::Deposit,
        Self::ConstructionSite,
        Self::Resource,
        Self::Tombstone,
        Self::Ruin,
    ];

    /// Host-facing class name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Creep => "Creep",
            Self::Spawn => "StructureSpawn",
            Self::Extension => "StructureExtension",
            Self::Tower => "StructureTower",
            Self::Storage => "StructureStorage",
            Self::Container => "StructureContainer",
            Self::Road => "StructureRoad",
            Self::Wall => "StructureWall",
            Self::Controller => "StructureController",
            Self::Source => "Source",
            Self::Mineral => "Mineral",
            Self::Deposit => "Deposit",
            Self::ConstructionSite => "ConstructionSite",
            Self::Resource => "Resource",
            Self::Tombstone => "Tombstone",
            Self::Ruin => "Ruin",
        }
    }

    /// Ordered preference list deciding which vital pair fills the
    /// packet's numeric fields for this kind.
    ///
    /// Selection is driven by the kind, not by "first non-zero value",
    /// so a creep at zero hits still reports hits.
    #[must_use]
    pub(crate) const fn vital_preference(self) -> &'static [VitalKind] {
        match self {
            Self::ConstructionSite => &[VitalKind::Progress, VitalKind::Hits],
            Self::Source => &[VitalKind::Energy],
            Self::Mineral | Self::Deposit => &[VitalKind::Mineral],
            Self::Resource => &[VitalKind::Energy, VitalKind::Mineral],
            _ => &[
                VitalKind::Hits,
                VitalKind::Progress,
                VitalKind::Energy,
                VitalKind::Mineral,
            ],
        }
    }
}

/// Which vital pair a preference entry refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VitalKind {
    Hits,
    Progress,
    Energy,
    Mineral,
}

/// A current/maximum pair (hits/hitsMax, progress/progressTotal, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vital {
    /// Current value.
    pub value: i32,
    /// Corresponding maximum, capacity, or total.
    pub max: i32,
}

impl Vital {
    /// Creates a vital pair.
    #[inline]
    #[must_use]
    pub const fn new(value: i32, max: i32) -> Self {
        Self { value, max }
    }
}

/// Where an entity stands in the world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldPosition {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Label of the containing spatial region, up to 6 ASCII chars.
    pub region: String,
}

impl WorldPosition {
    /// Creates a position.
    #[must_use]
    pub fn new(x: i32, y: i32, region: impl Into<String>) -> Self {
        Self {
            x,
            y,
            region: region.into(),
        }
    }
}

/// A host entity, projected into the fields the wire format carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    /// Entity identifier; some entities (e.g. unbuilt flags) have none.
    pub id: Option<String>,
    /// Kind discriminant.
    pub kind: EntityKind,
    /// True when the calling player owns this entity.
    pub owned: bool,
    /// Structural hits and maximum hits.
    pub hits: Option<Vital>,
    /// Build progress and total required.
    pub progress: Option<Vital>,
    /// Stored energy and energy capacity.
    pub energy: Option<Vital>,
    /// Mineral amount and density/total.
    pub mineral: Option<Vital>,
    /// Position in the world.
    pub position: WorldPosition,
}

impl Entity {
    /// Creates an entity with no identifier and no vitals.
    #[must_use]
    pub fn new(kind: EntityKind, position: WorldPosition) -> Self {
        Self {
            id: None,
            kind,
            owned: false,
            hits: None,
            progress: None,
            energy: None,
            mineral: None,
            position,
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Marks the entity as owned by the caller.
    #[must_use]
    pub fn owned(mut self) -> Self {
        self.owned = true;
        self
    }

    /// Sets the hits pair.
    #[must_use]
    pub fn with_hits(mut self, value: i32, max: i32) -> Self {
        self.hits = Some(Vital::new(value, max));
        self
    }

    /// Sets the progress pair.
    #[must_use]
    pub fn with_progress(mut self, value: i32, total: i32) -> Self {
        self.progress = Some(Vital::new(value, total));
        self
    }

    /// Sets the energy pair.
    #[must_use]
    pub fn with_energy(mut self, value: i32, capacity: i32) -> Self {
        self.energy = Some(Vital::new(value, capacity));
        self
    }

    /// Sets the mineral pair.
    #[must_use]
    pub fn with_mineral(mut self, amount: i32, total: i32) -> Self {
        self.mineral = Some(Vital::new(amount, total));
        self
    }

    /// Selects the vital pair for the packet's numeric fields.
    ///
    /// Walks this kind's preference list and returns the first pair that
    /// is present; `(0, 0)` when none is. Presence is what matters: a
    /// present pair with value zero is still selected.
    #[must_use]
    pub fn select_vitals(&self) -> (i32, i32) {
        for kind in self.kind.vital_preference() {
            let slot = match kind {
                VitalKind::Hits => self.hits,
                VitalKind::Progress => self.progress,
                VitalKind::Energy => self.energy,
                VitalKind::Mineral => self.mineral,
            };
            if let Some(vital) = slot {
                return (vital.value, vital.max);
            }
        }
        (0, 0)
    }
}

/// Terrain under a queried tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terrain {
    /// Open ground.
    Plain,
    /// Slow ground.
    Swamp,
    /// Impassable.
    Wall,
}

/// One element of a positional query result set.
///
/// Positional queries return a heterogeneous list; only the `Object`
/// variant carries an entity the marshaller can transfer. The encoder
/// matches on this discriminant exhaustively and skips the rest.
#[derive(Clone, Debug, PartialEq)]
pub enum LookValue {
    /// A transferable entity.
    Object(Entity),
    /// Terrain information; not an entity, skipped by the encoder.
    Terrain(Terrain),
    /// A visual-layer item; not an entity, skipped by the encoder.
    Visual,
}

impl LookValue {
    /// Unwraps to the concrete entity, if this value carries one.
    #[must_use]
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Object(entity) => Some(entity),
            Self::Terrain(_) | Self::Visual => None,
        }
    }
}
