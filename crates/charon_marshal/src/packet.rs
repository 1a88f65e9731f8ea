//! # Packet Layout
//!
//! The bit-exact wire contract between the host and the native reader.
//!
//! ## Zero-Allocation Design
//!
//! Both record types are `Copy`, `Pod`, and fixed-size so the encoder can
//! assemble a record on the stack and copy it into the shared buffer in
//! one bounds-checked write, and the reader can index records by
//! `base + i * RoomObjectPacket::SIZE` with no length table.
//!
//! Records are written by Pod copy into an address space shared with the
//! native runtime, so the wire byte order is the host's by construction;
//! every supported target is little-endian. This is a session constant,
//! never a per-call choice.

use bytemuck::{Pod, Zeroable};

use crate::codec::ident::RAW_ID_LEN;
use crate::codec::position::REGION_LABEL_LEN;

/// A 2D coordinate plus the label of the spatial region containing it.
///
/// Total size: 16 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct PositionRecord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Region label, ASCII, zero-padded to 6 bytes regardless of length.
    pub region: [u8; REGION_LABEL_LEN],
    /// Reserved, always zero.
    pub reserved: [u8; 2],
}

impl PositionRecord {
    /// Size in bytes.
    pub const SIZE: usize = 16;

    /// Width of the zero-padded region label field.
    pub const REGION_LEN: usize = REGION_LABEL_LEN;
}

/// One entity serialized for the native reader.
///
/// Total size: 56 bytes, written contiguously with no inter-record
/// padding. Field offsets are a contract; any change breaks the reader.
///
/// | offset | size | field |
/// |--------|------|------------|
/// | 0      | 24   | `id`       |
/// | 24     | 4    | `type_tag` |
/// | 28     | 4    | `flags`    |
/// | 32     | 4    | `numeric0` |
/// | 36     | 4    | `numeric1` |
/// | 40     | 16   | `position` |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct RoomObjectPacket {
    /// Entity identifier, ASCII, zero-padded to 24 bytes.
    pub id: [u8; RAW_ID_LEN],
    /// Tag of the entity's registered class; 0 if unregistered.
    pub type_tag: u32,
    /// Flag bits, see [`RoomObjectPacket::FLAG_OWNED`].
    pub flags: u32,
    /// Primary vital (health, progress, energy or mineral amount,
    /// selected per entity kind).
    pub numeric0: i32,
    /// The maximum/capacity/total paired with `numeric0`.
    pub numeric1: i32,
    /// Embedded position record.
    pub position: PositionRecord,
}

impl RoomObjectPacket {
    /// Size in bytes.
    pub const SIZE: usize = 56;

    /// Flag bit: the entity is owned by the caller.
    pub const FLAG_OWNED: u32 = 1 << 0;

    /// Returns true if the owned flag is set.
    #[inline]
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        self.flags & Self::FLAG_OWNED != 0
    }
}
