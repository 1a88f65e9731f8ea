//! # Packet Encoder
//!
//! Bulk-encodes heterogeneous query results into contiguous
//! [`RoomObjectPacket`] records in the shared buffer.
//!
//! The encoder owns the full write cursor for the duration of one call;
//! the native side reads the records only after the call returns. Values
//! that carry no entity are skipped without advancing the count, and a
//! record that would cross the capacity limit stops the batch early with
//! a partial count. Neither case unwinds the calling driver.

use crate::buffer::SharedBuffer;
use crate::codec::ident::encode_identifier;
use crate::codec::position::encode_position;
use crate::entity::{Entity, LookValue};
use crate::error::{MarshalError, MarshalResult};
use crate::packet::RoomObjectPacket;
use crate::tags::{TypeTagRegistry, UNREGISTERED_TAG};

/// Result of one bulk encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct EncodeOutcome {
    /// Number of records actually written. May be less than the input
    /// length due to skips or truncation.
    pub written: usize,
    /// True when capacity ran out before the input was exhausted.
    pub truncated: bool,
}

/// Writes entity records into a borrowed [`SharedBuffer`].
///
/// Construction fails if the buffer has not been allocated; everything
/// after that is non-fatal by design.
pub struct PacketEncoder<'a> {
    buffer: &'a mut SharedBuffer,
    tags: &'a TypeTagRegistry,
    cursor: usize,
    limit: usize,
}

impl<'a> PacketEncoder<'a> {
    /// Creates an encoder writing from the start of the buffer.
    ///
    /// # Errors
    ///
    /// [`MarshalError::NotInitialized`] if the buffer is unallocated.
    pub fn new(buffer: &'a mut SharedBuffer, tags: &'a TypeTagRegistry) -> MarshalResult<Self> {
        Self::at_offset(buffer, tags, 0)
    }

    /// Creates an encoder writing from `offset`, the way an entry point
    /// with an out-pointer does.
    ///
    /// # Errors
    ///
    /// [`MarshalError::NotInitialized`] if the buffer is unallocated,
    /// [`MarshalError::BufferOverflow`] if `offset` is past the end.
    pub fn at_offset(
        buffer: &'a mut SharedBuffer,
        tags: &'a TypeTagRegistry,
        offset: usize,
    ) -> MarshalResult<Self> {
        if !buffer.is_allocated() {
            return Err(MarshalError::NotInitialized);
        }
        let limit = buffer.capacity();
        if offset > limit {
            return Err(MarshalError::BufferOverflow {
                offset,
                requested: 0,
                capacity: limit,
            });
        }
        Ok(Self {
            buffer,
            tags,
            cursor: offset,
            limit,
        })
    }

    /// Caps the batch at `max` records, like a caller-supplied maximum
    /// object count. Capacity still applies.
    #[must_use]
    pub fn max_records(mut self, max: usize) -> Self {
        let capped = self
            .cursor
            .saturating_add(max.saturating_mul(RoomObjectPacket::SIZE));
        self.limit = self.limit.min(capped);
        self
    }

    /// Current write offset in bytes.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Encodes a batch of query results in order.
    ///
    /// Non-entity values are skipped; capacity exhaustion truncates the
    /// batch. Surviving records keep the relative order of their inputs.
    pub fn encode_entities(&mut self, values: &[LookValue]) -> EncodeOutcome {
        self.encode_entities_with(values, |value| value)
    }

    /// Encodes a batch, projecting each item through `extractor` first.
    ///
    /// This is the keyed form of a positional query, where each result
    /// row wraps its payload under a per-kind field.
    pub fn encode_entities_with<T>(
        &mut self,
        items: &[T],
        extractor: impl Fn(&T) -> &LookValue,
    ) -> EncodeOutcome {
        let mut written = 0;
        for item in items {
            let Some(entity) = extractor(item).as_entity() else {
                tracing::debug!("skipping non-entity query value");
                continue;
            };
            if self.cursor + RoomObjectPacket::SIZE > self.limit {
                tracing::warn!(
                    written,
                    remaining = self.limit - self.cursor,
                    "record window exhausted, truncating encode"
                );
                return EncodeOutcome {
                    written,
                    truncated: true,
                };
            }
            let packet = self.build_packet(entity);
            if self.buffer.write_pod(self.cursor, &packet).is_err() {
                // Unreachable given the limit check, but a failed write
                // must still degrade to truncation, never a panic.
                return EncodeOutcome {
                    written,
                    truncated: true,
                };
            }
            self.cursor += RoomObjectPacket::SIZE;
            written += 1;
        }
        EncodeOutcome {
            written,
            truncated: false,
        }
    }

    fn build_packet(&self, entity: &Entity) -> RoomObjectPacket {
        let type_tag = self.tags.tag_of(entity.kind);
        if type_tag == UNREGISTERED_TAG {
            tracing::debug!(kind = entity.kind.name(), "encoding unregistered entity kind");
        }
        let (numeric0, numeric1) = entity.select_vitals();
        RoomObjectPacket {
            id: encode_identifier(entity.id.as_deref()),
            type_tag,
            flags: if entity.owned {
                RoomObjectPacket::FLAG_OWNED
            } else {
                0
            },
            numeric0,
            numeric1,
            position: encode_position(
                entity.position.x,
                entity.position.y,
                &entity.position.region,
            ),
        }
    }
}
