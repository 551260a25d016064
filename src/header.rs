//! The 16-byte chunk header.
//!
//! ```text
//! offset 0  : f64 scale
//! offset 8  : i64 bias
//! offset 16 : payload
//! ```

use crate::bytes::{ChunkBytes, WORD_WIDTH};
use crate::error::ChunkError;

const SCALE_OFFSET: usize = 0;
const BIAS_OFFSET: usize = WORD_WIDTH;

/// Scale and bias shared by every slot of a chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkHeader {
    /// Multiplicative factor applied on decode.
    pub scale: f64,
    /// Additive offset applied before scaling on decode.
    pub bias: i64,
}

impl ChunkHeader {
    /// Size of the encoded header in bytes.
    pub const SIZE: usize = WORD_WIDTH + WORD_WIDTH;

    /// Create a header, rejecting scales that cannot encode anything.
    pub fn new(bias: i64, scale: f64) -> Result<Self, ChunkError> {
        let header = ChunkHeader { scale, bias };
        header.validate()?;
        Ok(header)
    }

    /// Check that the scale is finite and non-zero.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(ChunkError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Write the header into the first [`Self::SIZE`] bytes of `buf`.
    pub fn write_to(&self, buf: &mut ChunkBytes) {
        buf.write_f64(SCALE_OFFSET, self.scale);
        buf.write_i64(BIAS_OFFSET, self.bias);
    }

    /// Read the header from the first [`Self::SIZE`] bytes of `buf`.
    pub fn read_from(buf: &ChunkBytes) -> Self {
        ChunkHeader {
            scale: buf.read_f64(SCALE_OFFSET),
            bias: buf.read_i64(BIAS_OFFSET),
        }
    }
}
