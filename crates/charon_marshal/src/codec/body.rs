//! # Creep Body Codec
//!
//! Packs a creep's body parts into one 32-bit word per part so the
//! native side can fetch a whole body in a single buffer read.
//!
//! Bit layout per part (matching the native runtime's decoder):
//!
//! ```text
//! bits 16-23  part kind   (0-7)
//! bits  8-15  hits        (0-100)
//! bits  0-7   boost index (127 = unboosted)
//! ```

use crate::buffer::SharedBuffer;
use crate::error::MarshalResult;

/// Boost-index sentinel for an unboosted part.
pub const UNBOOSTED: u8 = 127;

/// Body part kinds, in the native runtime's enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodyPartKind {
    /// Movement part.
    Move = 0,
    /// Work part (harvest, build, repair).
    Work = 1,
    /// Carry part.
    Carry = 2,
    /// Melee attack part.
    Attack = 3,
    /// Ranged attack part.
    RangedAttack = 4,
    /// Damage-soaking part.
    Tough = 5,
    /// Heal part.
    Heal = 6,
    /// Claim part.
    Claim = 7,
}

/// One part of a creep body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyPart {
    /// Kind of part.
    pub kind: BodyPartKind,
    /// Remaining hits, 0-100.
    pub hits: u8,
    /// Index of the boosting resource in the session's resource table,
    /// or `None` when unboosted.
    pub boost: Option<u8>,
}

/// Packs a single body part into its 32-bit wire form.
#[must_use]
pub fn pack_body_part(part: &BodyPart) -> u32 {
    let boost = u32::from(part.boost.unwrap_or(UNBOOSTED));
    (u32::from(part.kind as u8) << 16) | (u32::from(part.hits) << 8) | boost
}

/// Encodes a whole body into the shared buffer starting at `offset`,
/// one packed word per part. Returns the number of parts written.
///
/// # Errors
///
/// Propagates buffer errors: not-initialized, or a body that does not
/// fit at `offset`. Bodies are tiny (at most 50 parts), so unlike the
/// entity encoder this path treats overflow as a caller bug rather than
/// truncating.
pub fn encode_creep_body(
    buffer: &mut SharedBuffer,
    offset: usize,
    body: &[BodyPart],
) -> MarshalResult<usize> {
    for (i, part) in body.iter().enumerate() {
        buffer.write_u32(offset + i * 4, pack_body_part(part))?;
    }
    Ok(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_bit_layout() {
        let packed = pack_body_part(&BodyPart {
            kind: BodyPartKind::RangedAttack,
            hits: 100,
            boost: Some(33),
        });
        assert_eq!(packed >> 16, 4);
        assert_eq!((packed >> 8) & 0xFF, 100);
        assert_eq!(packed & 0xFF, 33);
    }

    #[test]
    fn test_unboosted_sentinel() {
        let packed = pack_body_part(&BodyPart {
            kind: BodyPartKind::Move,
            hits: 0,
            boost: None,
        });
        assert_eq!(packed & 0xFF, u32::from(UNBOOSTED));
    }

    #[test]
    fn test_encode_body_into_buffer() {
        let mut buffer = SharedBuffer::new();
        buffer.allocate(64).unwrap();

        let body = [
            BodyPart {
                kind: BodyPartKind::Work,
                hits: 100,
                boost: None,
            },
            BodyPart {
                kind: BodyPartKind::Carry,
                hits: 50,
                boost: Some(2),
            },
        ];
        let written = encode_creep_body(&mut buffer, 8, &body).unwrap();
        assert_eq!(written, 2);

        let bytes = buffer.as_bytes();
        let first = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let second = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
        assert_eq!(first, pack_body_part(&body[0]));
        assert_eq!(second, pack_body_part(&body[1]));
    }
}
