//! # CHARON Marshal - The Crossing
//!
//! Fixed-layout marshalling between a live host object graph and a native
//! runtime that reads the results directly out of a shared byte buffer.
//!
//! ## Architecture
//!
//! - **Shared Buffer**: a byte region allocated once per session; every
//!   write is offset-based and bounds-checked.
//! - **Codecs**: identifier (24-byte zero-padded), position (16-byte
//!   record with a region label), packed creep bodies.
//! - **Packet Encoder**: bulk-encodes heterogeneous entities into
//!   contiguous 56-byte [`RoomObjectPacket`] records and returns only a
//!   count; the native side indexes the records by fixed offset.
//!
//! ## Failure Model
//!
//! Capacity exhaustion is not an error: the encoder stops early, reports
//! a partial count, and the host session keeps running. Only using the
//! buffer before allocation is fatal to the calling entry point.
//!
//! ## Example
//!
//! ```rust,ignore
//! use charon_marshal::{PacketEncoder, SharedBuffer, TypeTagRegistry};
//!
//! let mut buffer = SharedBuffer::new();
//! buffer.allocate(64 * 1024)?;
//! let tags = TypeTagRegistry::with_standard_kinds();
//!
//! let mut encoder = PacketEncoder::new(&mut buffer, &tags)?;
//! let outcome = encoder.encode_entities(&query_results);
//! // Native side now reads `outcome.written` records at base + i * 56.
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod buffer;
pub mod codec;
pub mod encoder;
pub mod entity;
pub mod error;
pub mod packet;
pub mod tags;

pub use buffer::{BufferInfo, SharedBuffer};
pub use codec::body::{encode_creep_body, pack_body_part, BodyPart, BodyPartKind, UNBOOSTED};
pub use codec::ident::{decode_identifier, encode_identifier, RAW_ID_LEN};
pub use codec::position::{decode_position, encode_position, REGION_LABEL_LEN};
pub use encoder::{EncodeOutcome, PacketEncoder};
pub use entity::{Entity, EntityKind, LookValue, Terrain, Vital, WorldPosition};
pub use error::{MarshalError, MarshalResult};
pub use packet::{PositionRecord, RoomObjectPacket};
pub use tags::{TypeTagRegistry, UNREGISTERED_TAG};
