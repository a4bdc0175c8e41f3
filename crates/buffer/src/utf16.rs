// Chunk: docs/chunks/utf16_offsets - UTF-16 offset conversion

//! Conversions between UTF-8 byte offsets and UTF-16 code-unit offsets.
//!
//! Pattern matchers and `str` methods report byte offsets; the public offset
//! unit is the UTF-16 code unit. [`Utf16Map`] is built once per snapshot and
//! answers conversions in O(1) (byte → unit) and O(log n) (unit → byte).

/// Returns the length of `text` in UTF-16 code units.
pub fn len_utf16(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Returns true if `unit` is the high half of a surrogate pair.
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

/// Returns true if `unit` is the low half of a surrogate pair.
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Byte ↔ UTF-16 offset table for one string snapshot.
#[derive(Debug, Clone)]
pub struct Utf16Map {
    /// `units_at_byte[b]` is the UTF-16 offset of the char containing byte
    /// `b`; the final entry is the total unit length. Empty when the text is
    /// ASCII, where both offsets coincide.
    units_at_byte: Vec<usize>,
    byte_len: usize,
    unit_len: usize,
}

impl Utf16Map {
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                units_at_byte: Vec::new(),
                byte_len: text.len(),
                unit_len: text.len(),
            };
        }

        let mut units_at_byte = Vec::with_capacity(text.len() + 1);
        let mut units = 0;
        for ch in text.chars() {
            for _ in 0..ch.len_utf8() {
                units_at_byte.push(units);
            }
            units += ch.len_utf16();
        }
        units_at_byte.push(units);

        Self {
            units_at_byte,
            byte_len: text.len(),
            unit_len: units,
        }
    }

    /// Total length in code units.
    pub fn unit_len(&self) -> usize {
        self.unit_len
    }

    /// Converts a byte offset to a UTF-16 offset (clamped to the end).
    pub fn to_utf16(&self, byte: usize) -> usize {
        let byte = byte.min(self.byte_len);
        if self.units_at_byte.is_empty() {
            byte
        } else {
            self.units_at_byte[byte]
        }
    }

    /// Converts a UTF-16 offset to the byte offset of the char starting
    /// there. Offsets inside a surrogate pair resolve to the following char.
    pub fn to_byte(&self, unit: usize) -> usize {
        let unit = unit.min(self.unit_len);
        if self.units_at_byte.is_empty() {
            unit
        } else {
            self.units_at_byte.partition_point(|&u| u < unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_utf16() {
        assert_eq!(len_utf16(""), 0);
        assert_eq!(len_utf16("abc"), 3);
        assert_eq!(len_utf16("é"), 1);
        assert_eq!(len_utf16("😀"), 2);
    }

    #[test]
    fn test_ascii_map_is_identity() {
        let map = Utf16Map::new("hello");
        assert_eq!(map.to_utf16(3), 3);
        assert_eq!(map.to_byte(3), 3);
        assert_eq!(map.to_utf16(99), 5);
    }

    #[test]
    fn test_multibyte_map() {
        // "aé😀b": bytes a=0, é=1..3, 😀=3..7, b=7; units a=0, é=1, 😀=2..4, b=4
        let text = "aé😀b";
        let map = Utf16Map::new(text);
        assert_eq!(map.unit_len(), 5);
        assert_eq!(map.to_utf16(0), 0);
        assert_eq!(map.to_utf16(1), 1);
        assert_eq!(map.to_utf16(3), 2);
        assert_eq!(map.to_utf16(7), 4);
        assert_eq!(map.to_utf16(8), 5);

        assert_eq!(map.to_byte(1), 1);
        assert_eq!(map.to_byte(2), 3);
        assert_eq!(map.to_byte(4), 7);
        assert_eq!(map.to_byte(5), 8);
    }

    #[test]
    fn test_surrogate_classification() {
        let units: Vec<u16> = "😀".encode_utf16().collect();
        assert!(is_high_surrogate(units[0]));
        assert!(is_low_surrogate(units[1]));
        assert!(!is_high_surrogate(b'a' as u16));
    }
}
