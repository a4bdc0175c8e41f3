// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! Gap buffer of UTF-16 code units.
//!
//! The backing store is laid out as `[pre-gap | gap | post-gap]`. The logical
//! text is the pre-gap run followed by the post-gap run. Edits at the gap are
//! O(1) amortized; moving the gap costs O(distance moved), which is zero when
//! consecutive edits land at the same spot.

const INITIAL_GAP_SIZE: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// A gap buffer storing UTF-16 code units.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// The underlying storage. Contains [pre-gap content | gap | post-gap content].
    data: Vec<u16>,
    /// Index where the gap starts (first unused slot). Equals the logical gap position.
    gap_start: usize,
    /// Index where the gap ends (first used slot after the gap).
    gap_end: usize,
}

impl GapBuffer {
    /// Creates a new empty gap buffer.
    pub fn new() -> Self {
        Self {
            data: vec![0; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
        }
    }

    /// Creates a gap buffer holding `text`, with the gap at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        let mut data: Vec<u16> = text.encode_utf16().collect();
        let len = data.len();
        let capacity = len + INITIAL_GAP_SIZE;
        data.resize(capacity, 0);

        Self {
            data,
            gap_start: len,
            gap_end: capacity,
        }
    }

    /// Returns the logical length in code units (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Returns the logical position of the gap.
    pub fn gap_position(&self) -> usize {
        self.gap_start
    }

    /// The code units before the gap.
    pub fn pre_gap(&self) -> &[u16] {
        &self.data[..self.gap_start]
    }

    /// The code units after the gap.
    pub fn post_gap(&self) -> &[u16] {
        &self.data[self.gap_end..]
    }

    /// Moves the gap to the given logical position (clamped to `len`).
    ///
    /// Returns the number of code units transferred across the gap.
    pub fn move_gap_to(&mut self, pos: usize) -> usize {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            // Shift [pos..gap_start] to the end of the gap.
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
            shift
        } else if pos > self.gap_start {
            // Shift [gap_end..gap_end + shift] to the start of the gap.
            let shift = pos - self.gap_start;
            self.data.copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
            shift
        } else {
            0
        }
    }

    /// Grows the gap in place so it holds at least `min_size` units.
    ///
    /// The gap position is preserved; callers rely on the gap staying where
    /// `move_gap_to` left it.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }

        let needed = min_size - self.gap_len();
        let growth = needed.max(self.data.len() * GAP_GROWTH_FACTOR);

        let old_gap_end = self.gap_end;
        let old_len = self.data.len();
        let post_gap_len = old_len - old_gap_end;

        let new_size = old_len + growth;
        self.data.resize(new_size, 0);

        if post_gap_len > 0 {
            let new_post_gap_start = new_size - post_gap_len;
            self.data
                .copy_within(old_gap_end..old_len, new_post_gap_start);
        }

        self.gap_end = new_size - post_gap_len;
    }

    /// Writes `units` at the gap and advances the gap past them.
    pub fn insert_units(&mut self, units: &[u16]) {
        if units.is_empty() {
            return;
        }
        self.ensure_gap(units.len());
        let end = self.gap_start + units.len();
        self.data[self.gap_start..end].copy_from_slice(units);
        self.gap_start = end;
    }

    /// Encodes `text` as UTF-16 and inserts it at the gap.
    pub fn insert_str(&mut self, text: &str) {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.insert_units(&units);
    }

    /// Removes up to `count` units directly after the gap.
    ///
    /// Returns the removed units.
    pub fn delete_forward(&mut self, count: usize) -> Vec<u16> {
        let available = self.data.len() - self.gap_end;
        let count = count.min(available);
        let removed = self.data[self.gap_end..self.gap_end + count].to_vec();
        self.gap_end += count;
        removed
    }

    /// Returns the code unit at a logical position.
    pub fn unit_at(&self, pos: usize) -> Option<u16> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.data[physical])
    }

    /// Returns an iterator over all code units in logical order.
    pub fn units(&self) -> impl Iterator<Item = u16> + '_ {
        self.pre_gap().iter().chain(self.post_gap().iter()).copied()
    }

    /// Copies the logical range `[start, end)` out of the buffer.
    ///
    /// Both ends are clamped to `len`.
    pub fn slice(&self, start: usize, end: usize) -> Vec<u16> {
        let start = start.min(self.len());
        let end = end.min(self.len());
        if start >= end {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(end - start);
        let pre = self.pre_gap();
        let post = self.post_gap();
        if start < pre.len() {
            out.extend_from_slice(&pre[start..end.min(pre.len())]);
        }
        if end > pre.len() {
            let post_start = start.max(pre.len()) - pre.len();
            let post_end = end - pre.len();
            out.extend_from_slice(&post[post_start..post_end]);
        }
        out
    }

    /// Replaces the whole content, leaving the gap at the end.
    pub fn reset(&mut self, text: &str) {
        *self = Self::from_str(text);
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in char::decode_utf16(self.units()) {
            write!(f, "{}", ch.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_new_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.gap_position(), 0);
    }

    #[test]
    fn test_from_str_puts_gap_at_end() {
        let buf = GapBuffer::from_str("hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.gap_position(), 5);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_insert_at_middle() {
        let mut buf = GapBuffer::from_str("ac");
        buf.move_gap_to(1);
        buf.insert_str("b");
        assert_eq!(buf.to_string(), "abc");
        assert_eq!(buf.gap_position(), 2);
    }

    #[test]
    fn test_move_gap_reports_distance() {
        let mut buf = GapBuffer::from_str("abcdef");
        assert_eq!(buf.move_gap_to(3), 3);
        assert_eq!(buf.move_gap_to(3), 0);
        assert_eq!(buf.move_gap_to(0), 3);
        assert_eq!(buf.move_gap_to(100), 6);
        assert_eq!(buf.to_string(), "abcdef");
    }

    #[test]
    fn test_pre_and_post_gap_split() {
        let mut buf = GapBuffer::from_str("abcdef");
        buf.move_gap_to(2);
        assert_eq!(buf.pre_gap(), utf16("ab").as_slice());
        assert_eq!(buf.post_gap(), utf16("cdef").as_slice());
    }

    #[test]
    fn test_delete_forward() {
        let mut buf = GapBuffer::from_str("abcdef");
        buf.move_gap_to(1);
        let removed = buf.delete_forward(3);
        assert_eq!(removed, utf16("bcd"));
        assert_eq!(buf.to_string(), "aef");
    }

    #[test]
    fn test_delete_forward_clamps_to_end() {
        let mut buf = GapBuffer::from_str("abc");
        buf.move_gap_to(2);
        assert_eq!(buf.delete_forward(10), utf16("c"));
        assert_eq!(buf.delete_forward(1), Vec::<u16>::new());
        assert_eq!(buf.to_string(), "ab");
    }

    #[test]
    fn test_unit_at_with_gap_in_middle() {
        let mut buf = GapBuffer::from_str("hello");
        buf.move_gap_to(2);
        let units: Vec<Option<u16>> = (0..6).map(|i| buf.unit_at(i)).collect();
        let expected: Vec<Option<u16>> = utf16("hello")
            .into_iter()
            .map(Some)
            .chain(std::iter::once(None))
            .collect();
        assert_eq!(units, expected);
    }

    #[test]
    fn test_slice_across_gap() {
        let mut buf = GapBuffer::from_str("hello world");
        buf.move_gap_to(4);
        assert_eq!(buf.slice(0, 5), utf16("hello"));
        assert_eq!(buf.slice(2, 8), utf16("llo wo"));
        assert_eq!(buf.slice(6, 11), utf16("world"));
        assert_eq!(buf.slice(6, 100), utf16("world"));
        assert!(buf.slice(8, 3).is_empty());
    }

    #[test]
    fn test_surrogate_pairs_count_as_two_units() {
        let buf = GapBuffer::from_str("a😀b");
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_string(), "a😀b");
    }

    #[test]
    fn test_large_insert_grows_gap() {
        let mut buf = GapBuffer::new();
        let chunk = "x".repeat(1000);
        buf.insert_str(&chunk);
        buf.move_gap_to(500);
        buf.insert_str("y");
        assert_eq!(buf.len(), 1001);
        assert_eq!(buf.unit_at(500), Some(b'y' as u16));
    }
}
