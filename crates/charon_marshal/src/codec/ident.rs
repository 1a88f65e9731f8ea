//! # Identifier Codec
//!
//! Fixed-width entity identifiers: 24 ASCII bytes, zero-padded.
//!
//! The absent-identifier case zero-fills the whole field explicitly;
//! the reader must never see leftover bytes from a previous record.

/// Width of the raw identifier field in bytes.
pub const RAW_ID_LEN: usize = 24;

/// Encodes an identifier into a fixed 24-byte field.
///
/// Longer identifiers are truncated to 24 bytes (not an error); shorter
/// ones are zero-padded; `None` yields an all-zero field.
#[must_use]
pub fn encode_identifier(id: Option<&str>) -> [u8; RAW_ID_LEN] {
    let mut field = [0u8; RAW_ID_LEN];
    if let Some(id) = id {
        for (dst, src) in field.iter_mut().zip(id.bytes()) {
            *dst = src;
        }
    }
    field
}

/// Decodes an identifier field: bytes up to the first NUL, or all 24.
#[must_use]
pub fn decode_identifier(field: &[u8; RAW_ID_LEN]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(RAW_ID_LEN);
    field[..len].iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let field = encode_identifier(Some("5bbcadc9099fc012e0633b60"));
        assert_eq!(decode_identifier(&field), "5bbcadc9099fc012e0633b60");
    }

    #[test]
    fn test_short_id_zero_padded() {
        let field = encode_identifier(Some("abc"));
        assert_eq!(&field[..3], b"abc");
        assert!(field[3..].iter().all(|&b| b == 0));
        assert_eq!(decode_identifier(&field), "abc");
    }

    #[test]
    fn test_absent_id_is_all_zeros() {
        assert_eq!(encode_identifier(None), [0u8; RAW_ID_LEN]);
        assert_eq!(decode_identifier(&[0u8; RAW_ID_LEN]), "");
    }

    #[test]
    fn test_overlong_id_truncated() {
        let id = "0123456789abcdef0123456789abcdef";
        let field = encode_identifier(Some(id));
        assert_eq!(decode_identifier(&field), &id[..RAW_ID_LEN]);
    }
}
