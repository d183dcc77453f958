//! Two-decimal-digits-per-byte packing used by the money field.

pub const MAX_PAIR: u8 = 99;

/// Undefined (but non-panicking) when either nibble is above 9.
pub fn decode_pair(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0F)
}

pub fn encode_pair(value: u8) -> u8 {
    let value = value.min(MAX_PAIR);
    ((value / 10) << 4) | (value % 10)
}

pub fn pair_is_valid(byte: u8) -> bool {
    (byte >> 4) <= 9 && (byte & 0x0F) <= 9
}

/// Most significant pair first.
pub fn decode_field(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| acc * 100 + u32::from(decode_pair(b)))
}

/// Digits that do not fit in `width` pairs are dropped from the top.
pub fn encode_field(mut value: u32, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    for slot in out.iter_mut().rev() {
        *slot = encode_pair((value % 100) as u8);
        value /= 100;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_match_known_encodings() {
        for (decimal, packed) in [(0, 0x00), (5, 0x05), (12, 0x12), (23, 0x23), (50, 0x50), (99, 0x99)] {
            assert_eq!(encode_pair(decimal), packed);
            assert_eq!(decode_pair(packed), decimal);
        }
    }

    #[test]
    fn encode_pair_clamps() {
        assert_eq!(encode_pair(100), 0x99);
        assert_eq!(encode_pair(u8::MAX), 0x99);
    }

    #[test]
    fn nibble_validation() {
        assert!(pair_is_valid(0x99));
        assert!(!pair_is_valid(0xAF));
        assert!(!pair_is_valid(0x0A));
        assert!(!pair_is_valid(0xA0));
    }

    #[test]
    fn field_example() {
        assert_eq!(encode_field(123_456, 3), vec![0x12, 0x34, 0x56]);
        assert_eq!(decode_field(&[0x12, 0x34, 0x56]), 123_456);
        assert_eq!(encode_field(7, 3), vec![0x00, 0x00, 0x07]);
    }
}
