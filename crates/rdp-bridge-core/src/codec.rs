//! CP1252 and UTF-16LE transcoding for clipboard text (spec §4.4).
//!
//! `ironrdp-cliprdr`'s own `FormatDataResponse::new_string` does not perform real
//! CP1252 encoding — it writes the UTF-8 bytes of its input verbatim plus a NUL, which
//! only happens to agree with CP1252 for the ASCII range. Genuine CP1252 is implemented
//! from scratch here; no crate in the workspace dependency set covers it.

use crate::config::CLIPBOARD_MAX_LENGTH;

/// Windows-1252 0x80-0x9F block. Index `byte - 0x80` gives the Unicode scalar value;
/// `0x81`, `0x8D`, `0x8F`, `0x90`, and `0x9D` are undefined in the standard and map to
/// their own byte value, matching the common browser/Windows fallback behavior.
const CP1252_HIGH_CONTROL: [u32; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F,
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178,
];

/// Decodes a CP1252 byte string into a `String`, truncating to `max_len` decoded
/// characters if needed.
pub fn cp1252_to_utf8(bytes: &[u8], max_len: usize) -> String {
    bytes
        .iter()
        .take(max_len)
        .map(|&byte| {
            let scalar = if (0x80..=0x9F).contains(&byte) {
                CP1252_HIGH_CONTROL[(byte - 0x80) as usize]
            } else {
                byte as u32
            };
            char::from_u32(scalar).unwrap_or('\u{FFFD}')
        })
        .collect()
}

/// Encodes `text` as CP1252, substituting `?` (0x3F) for characters with no CP1252
/// representation, and truncating the output to `max_len` bytes.
pub fn utf8_to_cp1252(text: &str, max_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len().min(max_len));
    for ch in text.chars() {
        if out.len() >= max_len {
            break;
        }
        let scalar = ch as u32;
        let byte = if scalar < 0x80 || (0xA0..=0xFF).contains(&scalar) {
            Some(scalar as u8)
        } else {
            CP1252_HIGH_CONTROL
                .iter()
                .position(|&candidate| candidate == scalar)
                .map(|index| (0x80 + index) as u8)
        };
        out.push(byte.unwrap_or(b'?'));
    }
    out
}

/// Decodes a little-endian UTF-16 byte string, truncating to `max_len` decoded bytes of
/// UTF-8 output. Unpaired surrogates are replaced with U+FFFD.
pub fn utf16le_to_utf8(bytes: &[u8], max_len: usize) -> String {
    let units = bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let mut out = String::new();
    for ch in char::decode_utf16(units) {
        let ch = ch.unwrap_or('\u{FFFD}');
        if out.len() + ch.len_utf8() > max_len {
            break;
        }
        out.push(ch);
    }
    out
}

/// Encodes `text` as little-endian UTF-16, truncating whole code units so the output
/// never exceeds `max_len` bytes.
pub fn utf8_to_utf16le(text: &str, max_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len().min(max_len));
    for unit in text.encode_utf16() {
        if out.len() + 2 > max_len {
            break;
        }
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Clamps `max_len` to the clipboard buffer's configured bound, so callers that pass a
/// caller-supplied limit can't exceed the documented cap.
pub fn clamp_max_len(requested: usize) -> usize {
    requested.min(CLIPBOARD_MAX_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cp1252_round_trips_ascii() {
        let bytes = utf8_to_cp1252("hello", 100);
        assert_eq!(cp1252_to_utf8(&bytes, 100), "hello");
    }

    #[test]
    fn cp1252_round_trips_euro_sign() {
        let bytes = utf8_to_cp1252("\u{20AC}5", 100);
        assert_eq!(bytes, vec![0x80, b'5']);
        assert_eq!(cp1252_to_utf8(&bytes, 100), "\u{20AC}5");
    }

    #[test]
    fn cp1252_substitutes_unrepresentable_characters() {
        let bytes = utf8_to_cp1252("a\u{4E2D}b", 100);
        assert_eq!(bytes, vec![b'a', b'?', b'b']);
    }

    #[test]
    fn utf16le_round_trips_non_bmp_character() {
        let text = "hi \u{1F600}";
        let bytes = utf8_to_utf16le(text, 100);
        assert_eq!(utf16le_to_utf8(&bytes, 100), text);
    }

    #[test]
    fn utf16le_encoding_truncates_at_whole_code_units() {
        let bytes = utf8_to_utf16le("abcdef", 5);
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn clamp_max_len_never_exceeds_configured_bound() {
        assert_eq!(clamp_max_len(usize::MAX), CLIPBOARD_MAX_LENGTH);
        assert_eq!(clamp_max_len(10), 10);
    }
}
