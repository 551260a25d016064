//! Checked byte-buffer access.
//!
//! This module provides a `ChunkBytes` type that owns a chunk's raw storage
//! and reads or writes little-endian integers and floats at byte offsets.

use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

/// Width in bytes of an `i32` slot.
pub const I32_WIDTH: usize = 4;

/// Width in bytes of an `i64` or `f64` field.
pub const WORD_WIDTH: usize = 8;

/// An owned byte buffer with typed, bounds-checked accessors.
///
/// Every accessor panics if `offset + width` runs past the end of the
/// buffer, naming the offset and the buffer length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBytes {
    buff: Vec<u8>,
}

impl ChunkBytes {
    /// Wrap an existing buffer.
    #[inline]
    pub fn new(buff: Vec<u8>) -> Self {
        ChunkBytes { buff }
    }

    /// Allocate a zero-filled buffer of `len` bytes.
    #[inline]
    pub fn zeroed(len: usize) -> Self {
        ChunkBytes { buff: vec![0; len] }
    }

    /// Total number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buff.len()
    }

    /// Whether the buffer has no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buff.is_empty()
    }

    /// Get a reference to the underlying buffer as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buff
    }

    /// Give the buffer back.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.buff
    }

    #[inline]
    fn range(&self, offset: usize, width: usize) -> Range<usize> {
        let end = offset.checked_add(width);
        match end {
            Some(end) if end <= self.buff.len() => offset..end,
            _ => panic!(
                "byte access out of bounds: offset {} width {} buffer length {}",
                offset,
                width,
                self.buff.len()
            ),
        }
    }

    /// Read a little-endian `i32` at `offset`.
    #[inline]
    pub fn read_i32(&self, offset: usize) -> i32 {
        LittleEndian::read_i32(&self.buff[self.range(offset, I32_WIDTH)])
    }

    /// Write a little-endian `i32` at `offset`.
    #[inline]
    pub fn write_i32(&mut self, offset: usize, value: i32) {
        let r = self.range(offset, I32_WIDTH);
        LittleEndian::write_i32(&mut self.buff[r], value);
    }

    /// Read a little-endian `i64` at `offset`.
    #[inline]
    pub fn read_i64(&self, offset: usize) -> i64 {
        LittleEndian::read_i64(&self.buff[self.range(offset, WORD_WIDTH)])
    }

    /// Write a little-endian `i64` at `offset`.
    #[inline]
    pub fn write_i64(&mut self, offset: usize, value: i64) {
        let r = self.range(offset, WORD_WIDTH);
        LittleEndian::write_i64(&mut self.buff[r], value);
    }

    /// Read a little-endian IEEE-754 `f64` at `offset`.
    #[inline]
    pub fn read_f64(&self, offset: usize) -> f64 {
        LittleEndian::read_f64(&self.buff[self.range(offset, WORD_WIDTH)])
    }

    /// Write a little-endian IEEE-754 `f64` at `offset`.
    #[inline]
    pub fn write_f64(&mut self, offset: usize, value: f64) {
        let r = self.range(offset, WORD_WIDTH);
        LittleEndian::write_f64(&mut self.buff[r], value);
    }
}

impl AsRef<[u8]> for ChunkBytes {
    fn as_ref(&self) -> &[u8] {
        &self.buff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_is_little_endian() {
        let mut bytes = ChunkBytes::zeroed(8);
        bytes.write_i32(4, 0x0403_0201);
        assert_eq!(bytes.as_slice(), &[0, 0, 0, 0, 1, 2, 3, 4]);
        assert_eq!(bytes.read_i32(4), 0x0403_0201);
    }

    #[test]
    fn test_i32_min_bytes() {
        let mut bytes = ChunkBytes::zeroed(4);
        bytes.write_i32(0, i32::MIN);
        assert_eq!(bytes.as_slice(), &[0, 0, 0, 0x80]);
        assert_eq!(bytes.read_i32(0), i32::MIN);
    }

    #[test]
    fn test_i64_and_f64() {
        let mut bytes = ChunkBytes::zeroed(16);
        bytes.write_f64(0, 0.01);
        bytes.write_i64(8, -42);
        assert_eq!(bytes.read_f64(0), 0.01);
        assert_eq!(bytes.read_i64(8), -42);
        assert_eq!(&bytes.as_slice()[0..8], &0.01f64.to_le_bytes());
        assert_eq!(&bytes.as_slice()[8..16], &(-42i64).to_le_bytes());
    }

    #[test]
    fn test_writes_do_not_touch_neighbours() {
        let mut bytes = ChunkBytes::new(vec![0xAA; 12]);
        bytes.write_i32(4, 0);
        assert_eq!(&bytes.as_slice()[0..4], &[0xAA; 4]);
        assert_eq!(&bytes.as_slice()[8..12], &[0xAA; 4]);
    }

    #[test]
    fn test_len_and_into_vec() {
        let bytes = ChunkBytes::new(vec![1, 2, 3]);
        assert_eq!(bytes.len(), 3);
        assert!(!bytes.is_empty());
        assert_eq!(bytes.into_vec(), vec![1, 2, 3]);
        assert!(ChunkBytes::zeroed(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "byte access out of bounds")]
    fn test_read_past_end_panics() {
        let bytes = ChunkBytes::zeroed(6);
        bytes.read_i32(4);
    }

    #[test]
    #[should_panic(expected = "byte access out of bounds")]
    fn test_write_offset_overflow_panics() {
        let mut bytes = ChunkBytes::zeroed(8);
        bytes.write_i64(usize::MAX - 2, 1);
    }
}
