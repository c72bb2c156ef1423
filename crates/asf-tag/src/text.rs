//! UTF-16LE text helpers.
//!
//! ASF stores every textual value as UTF-16LE. Attribute names and most
//! string values carry a single trailing NUL on disk; decoding strips at
//! most one.

/// Encode a string as NUL-terminated UTF-16LE bytes.
pub fn encode_utf16z(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((text.len() + 1) * 2);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes.extend_from_slice(&[0, 0]);
    bytes
}

/// Decode UTF-16LE bytes, stripping one trailing NUL if present.
///
/// A trailing odd byte is ignored; unpaired surrogates decode as the
/// replacement character rather than failing the whole value.
pub fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let units = match units.last() {
        Some(0) => &units[..units.len() - 1],
        _ => &units[..],
    };
    String::from_utf16_lossy(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_appends_terminator() {
        let bytes = encode_utf16z("Hi");
        assert_eq!(bytes, vec![b'H', 0, b'i', 0, 0, 0]);
    }

    #[test]
    fn decode_strips_single_terminator() {
        assert_eq!(decode_utf16(&[b'H', 0, b'i', 0, 0, 0]), "Hi");
        assert_eq!(decode_utf16(&[b'H', 0, b'i', 0]), "Hi");
    }

    #[test]
    fn decode_keeps_interior_nuls() {
        assert_eq!(decode_utf16(&[b'a', 0, 0, 0, b'b', 0]), "a\0b");
    }

    #[test]
    fn empty_round_trip() {
        assert_eq!(decode_utf16(&encode_utf16z("")), "");
        assert_eq!(decode_utf16(&[]), "");
    }

    #[test]
    fn non_ascii_round_trip() {
        let text = "\u{30bf}\u{30a4}\u{30c8}\u{30eb}";
        assert_eq!(decode_utf16(&encode_utf16z(text)), text);
    }
}
