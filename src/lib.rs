//! # scale-bias-chunk
//!
//! Fixed-width compressed column chunks using a scale/bias integer encoding.
//!
//! ## Overview
//!
//! A chunk stores a contiguous run of a column's numeric values as 4-byte
//! signed integers. A shared `f64` scale and `i64` bias turn each stored
//! integer `v` back into its logical value:
//!
//! ```text
//! value = (v + bias) * scale
//! ```
//!
//! The slot value `i32::MIN` is reserved for missing values.
//!
//! 1. **Bit-exact layout**: a 16-byte header (scale, bias) followed by the
//!    slots, little-endian, no padding
//! 2. **Checked writes**: a value is only stored if it decodes back to itself
//! 3. **Bulk decode**: ranges or index lists into caller buffers, or expansion
//!    into a growable [`ChunkBuilder`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scale_bias_chunk::{ColumnChunk, ExpandedChunk, ScaleBiasChunk};
//!
//! // Two decimal places, no bias
//! let mut chunk = ScaleBiasChunk::with_len(3, 0, 0.01).unwrap();
//! assert!(chunk.set_integer(0, 25));
//! assert!(!chunk.set_float(1, 0.5)); // floating writes need another encoding
//!
//! let mut out = [0.0; 3];
//! chunk.decode_range(&mut out, 0, 3, -1.0);
//! assert_eq!(out, [25.0, -1.0, -1.0]);
//!
//! // Persist and reopen
//! let reopened = ScaleBiasChunk::from_bytes(chunk.into_bytes()).unwrap();
//! assert_eq!(reopened.precision(), 2);
//!
//! // Hold it next to other encodings
//! let column: Vec<Box<dyn ColumnChunk>> = vec![Box::new(reopened)];
//! let mut staged = ExpandedChunk::new();
//! column[0].expand_range(&mut staged, 0, 3);
//! assert_eq!(staged.value_f64(0), 25.0);
//! ```
//!
//! ## Choosing a Scale
//!
//! | Scale | Decimal Places | Example |
//! |-------|---------------|---------|
//! | 1 | 0 | 3 |
//! | 0.1 | 1 | 3.1 |
//! | 0.01 | 2 | 3.14 |
//! | 0.001 | 3 | 3.142 |
//!
//! Only powers of ten can be expanded into a [`ChunkBuilder`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bytes;
mod chunk;
mod error;
mod header;
pub mod precision;
mod scale_bias;

pub use bytes::ChunkBytes;
pub use chunk::{ChunkBuilder, ColumnChunk, ExpandedChunk, ScaledValue};
pub use error::ChunkError;
pub use header::ChunkHeader;
pub use scale_bias::{ScaleBiasChunk, MISSING, SLOT_WIDTH};

/// Convenience type alias for Results with ChunkError.
pub type Result<T> = std::result::Result<T, ChunkError>;
