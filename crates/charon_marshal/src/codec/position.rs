//! # Position Codec
//!
//! Encodes a 2D coordinate plus a spatial region label into the 16-byte
//! [`PositionRecord`].
//!
//! The region label is zero-padded to the full 6-byte field for every
//! label length. Some prior informal encoders wrote a single NUL marker
//! for short labels instead; that form is non-uniform and is not
//! replicated here.

use crate::packet::PositionRecord;

/// Width of the zero-padded region label field.
pub const REGION_LABEL_LEN: usize = 6;

/// Encodes a coordinate and region label.
///
/// Labels longer than 6 bytes are truncated; shorter ones are
/// zero-padded. The two reserved bytes are always zero.
#[must_use]
pub fn encode_position(x: i32, y: i32, region_label: &str) -> PositionRecord {
    let mut region = [0u8; REGION_LABEL_LEN];
    for (dst, src) in region.iter_mut().zip(region_label.bytes()) {
        *dst = src;
    }
    PositionRecord {
        x,
        y,
        region,
        reserved: [0; 2],
    }
}

/// Decodes a position record back into `(x, y, label)`.
#[must_use]
pub fn decode_position(record: &PositionRecord) -> (i32, i32, String) {
    let len = record
        .region
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(REGION_LABEL_LEN);
    let label = record.region[..len].iter().map(|&b| char::from(b)).collect();
    (record.x, record.y, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_label_lengths() {
        for label in ["", "W", "W1", "W1N", "W1N8", "E12N3", "W12N34"] {
            let record = encode_position(-7, 42, label);
            assert_eq!(decode_position(&record), (-7, 42, label.to_owned()));
        }
    }

    #[test]
    fn test_short_label_fully_zero_padded() {
        let record = encode_position(0, 0, "W1");
        assert_eq!(&record.region, b"W1\0\0\0\0");
        assert_eq!(record.reserved, [0, 0]);
    }

    #[test]
    fn test_overlong_label_truncated() {
        let record = encode_position(1, 2, "W123N456");
        assert_eq!(&record.region, b"W123N4");
    }

    #[test]
    fn test_negative_coordinates() {
        let record = encode_position(i32::MIN, i32::MAX, "W0N0");
        let (x, y, _) = decode_position(&record);
        assert_eq!((x, y), (i32::MIN, i32::MAX));
    }
}
