//! Bounded per-pane output retention.

use std::collections::VecDeque;

/// Default bytes retained per pane (256 KB).
pub const DEFAULT_OUTPUT_BUFFER_BYTES: usize = 256 * 1024;

/// Ring buffer of the most recent output bytes of a pane.
///
/// When full, the oldest bytes are dropped so a runaway process can never
/// grow memory without bound.
#[derive(Debug)]
pub struct OutputBuffer {
    bytes: VecDeque<u8>,
    capacity: usize,
    dropped: u64,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: VecDeque::new(),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        let chunk = if chunk.len() > self.capacity {
            let skip = chunk.len() - self.capacity;
            self.dropped += skip as u64;
            &chunk[skip..]
        } else {
            chunk
        };

        let overflow = (self.bytes.len() + chunk.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            self.bytes.drain(..overflow);
            self.dropped += overflow as u64;
        }
        self.bytes.extend(chunk);
    }

    /// Retained bytes, oldest first.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total bytes discarded to stay within capacity.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        OutputBuffer::new(DEFAULT_OUTPUT_BUFFER_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_everything_under_capacity() {
        let mut buf = OutputBuffer::new(16);
        buf.push(b"hello ");
        buf.push(b"world");
        assert_eq!(buf.contents(), b"hello world");
        assert_eq!(buf.dropped(), 0);
    }

    #[test]
    fn drops_oldest_bytes_when_full() {
        let mut buf = OutputBuffer::new(8);
        buf.push(b"abcdef");
        buf.push(b"ghij");
        assert_eq!(buf.contents(), b"cdefghij");
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.dropped(), 2);
    }

    #[test]
    fn oversized_chunk_keeps_its_tail() {
        let mut buf = OutputBuffer::new(4);
        buf.push(b"xy");
        buf.push(b"0123456789");
        assert_eq!(buf.contents(), b"6789");
        assert_eq!(buf.dropped(), 8);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut buf = OutputBuffer::new(0);
        buf.push(b"abc");
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.contents(), b"c");
    }

    #[test]
    fn clear_and_default() {
        let mut buf = OutputBuffer::default();
        assert_eq!(buf.capacity(), DEFAULT_OUTPUT_BUFFER_BYTES);
        buf.push(b"data");
        buf.clear();
        assert!(buf.is_empty());
    }
}
