//! The column-chunk capability set and the growable builder it expands into.
//!
//! Every chunk encoding implements [`ColumnChunk`], so a column can keep a
//! `Vec<Box<dyn ColumnChunk>>` of mixed encodings and read them uniformly.

use crate::error::ChunkError;

/// Uniform access to one fixed-length run of a column's values.
///
/// Random-access methods panic when `i >= self.len()`.
pub trait ColumnChunk: std::fmt::Debug + Send + Sync {
    /// Number of values in the chunk.
    fn len(&self) -> usize;

    /// Whether the chunk holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value at `i` as an exact integer.
    ///
    /// Fails with [`ChunkError::MissingValue`] if the slot is missing.
    fn at(&self, i: usize) -> Result<i64, ChunkError>;

    /// The value at `i` as a double, `NaN` when missing.
    fn at_f64(&self, i: usize) -> f64;

    /// Whether the slot at `i` is missing.
    fn is_missing(&self, i: usize) -> bool;

    /// Store an integer at `i`. Returns `false` and leaves the chunk untouched
    /// when the value cannot be stored exactly in this encoding.
    fn set_i64(&mut self, i: usize, value: i64) -> bool;

    /// Store a double at `i`. Same contract as [`ColumnChunk::set_i64`].
    fn set_f64(&mut self, i: usize, value: f64) -> bool;

    /// Store a float at `i`. Same contract as [`ColumnChunk::set_i64`].
    fn set_f32(&mut self, i: usize, value: f32) -> bool;

    /// Mark the slot at `i` as missing.
    fn set_missing(&mut self, i: usize) -> bool;

    /// Decode `[from, to)` into `out[..to - from]`, writing `na` for missing slots.
    fn decode_range(&self, out: &mut [f64], from: usize, to: usize, na: f64);

    /// Decode each index of `ids` into the matching position of `out`,
    /// writing `NaN` for missing slots.
    fn decode_indices(&self, out: &mut [f64], ids: &[usize]);

    /// Append `[from, to)` to `builder` in order.
    fn expand_range(&self, builder: &mut dyn ChunkBuilder, from: usize, to: usize);

    /// Append each index of `ids` to `builder` in iteration order.
    fn expand_indices(&self, builder: &mut dyn ChunkBuilder, ids: &[usize]);

    /// Reload in-memory metadata from the raw buffer after deserialization.
    fn init_from_bytes(&mut self) -> Result<(), ChunkError>;

    /// Decimal places worth printing for values of this chunk.
    fn precision(&self) -> u8;

    /// Whether the chunk can hold non-integral values.
    fn has_fractional(&self) -> bool;
}

/// A growable staging area that decoded chunks are expanded into.
pub trait ChunkBuilder {
    /// Append a missing value.
    fn append_missing(&mut self);

    /// Append the value `mantissa * 10^exponent`.
    fn append_scaled(&mut self, mantissa: i64, exponent: i32);
}

/// A value in decimal scientific form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledValue {
    /// The integer digits.
    pub mantissa: i64,
    /// Power of ten applied to the mantissa.
    pub exponent: i32,
}

impl ScaledValue {
    /// The value as a double.
    pub fn to_f64(self) -> f64 {
        // 10^-k is inexact, 10^k is not.
        if self.exponent < 0 {
            self.mantissa as f64 / 10f64.powi(-self.exponent)
        } else {
            self.mantissa as f64 * 10f64.powi(self.exponent)
        }
    }
}

/// In-memory [`ChunkBuilder`] that keeps every appended entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedChunk {
    values: Vec<Option<ScaledValue>>,
}

impl ExpandedChunk {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        ExpandedChunk {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of appended entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether entry `i` is missing.
    pub fn is_missing(&self, i: usize) -> bool {
        self.values[i].is_none()
    }

    /// Entry `i` in scientific form, `None` when missing.
    pub fn get(&self, i: usize) -> Option<ScaledValue> {
        self.values[i]
    }

    /// Entry `i` as a double, `NaN` when missing.
    pub fn value_f64(&self, i: usize) -> f64 {
        self.values[i].map_or(f64::NAN, ScaledValue::to_f64)
    }

    /// Iterate over the entries in append order.
    pub fn iter(&self) -> impl Iterator<Item = Option<ScaledValue>> + '_ {
        self.values.iter().copied()
    }
}

impl ChunkBuilder for ExpandedChunk {
    fn append_missing(&mut self) {
        self.values.push(None);
    }

    fn append_scaled(&mut self, mantissa: i64, exponent: i32) {
        self.values.push(Some(ScaledValue { mantissa, exponent }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_value_to_f64() {
        let v = ScaledValue {
            mantissa: 250,
            exponent: -2,
        };
        assert_eq!(v.to_f64(), 2.5);

        let v = ScaledValue {
            mantissa: -3,
            exponent: 2,
        };
        assert_eq!(v.to_f64(), -300.0);

        let v = ScaledValue {
            mantissa: 7,
            exponent: 0,
        };
        assert_eq!(v.to_f64(), 7.0);
    }

    #[test]
    fn test_expanded_chunk_appends_in_order() {
        let mut nc = ExpandedChunk::with_capacity(3);
        assert!(nc.is_empty());

        nc.append_scaled(12, -1);
        nc.append_missing();
        nc.append_scaled(5, 1);

        assert_eq!(nc.len(), 3);
        assert_eq!(nc.value_f64(0), 1.2);
        assert!(nc.is_missing(1));
        assert!(nc.value_f64(1).is_nan());
        assert_eq!(nc.get(1), None);
        assert_eq!(
            nc.get(2),
            Some(ScaledValue {
                mantissa: 5,
                exponent: 1
            })
        );
        assert_eq!(nc.iter().filter(Option::is_some).count(), 2);
    }

    #[test]
    fn test_builder_through_trait_object() {
        let mut nc = ExpandedChunk::new();
        {
            let builder: &mut dyn ChunkBuilder = &mut nc;
            builder.append_missing();
            builder.append_scaled(1, 0);
        }
        assert_eq!(nc.len(), 2);
        assert_eq!(nc.value_f64(1), 1.0);
    }
}
