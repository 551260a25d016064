//! Scale/bias integer chunk.
//!
//! Values are stored as 4-byte signed integers `v` and reconstructed as
//! `(v + bias) * scale`, where `scale` and `bias` are shared by the whole
//! chunk and kept in a 16-byte header.
//!
//! ## Layout
//!
//! - Scale (8 bytes, f64)
//! - Bias (8 bytes, i64)
//! - Slots (4 bytes each, i32), [`MISSING`] for missing values
//!
//! All fields are little-endian. The buffer is exactly `16 + 4 * len` bytes.
//!
//! Writes are only committed when they survive the trip through the encoding:
//! a value that would be truncated, or that would need a slot outside
//! `(i32::MIN, i32::MAX]`, is rejected and the chunk is left unchanged.

use log::{debug, trace};

use crate::bytes::{ChunkBytes, I32_WIDTH};
use crate::chunk::{ChunkBuilder, ColumnChunk};
use crate::error::ChunkError;
use crate::header::ChunkHeader;
use crate::precision::{decimal_exponent, decimal_places, is_integral};

/// Slot value reserved for "missing".
pub const MISSING: i32 = i32::MIN;

/// Width in bytes of one slot.
pub const SLOT_WIDTH: usize = I32_WIDTH;

#[inline]
fn check_layout(len: usize) -> Result<(), ChunkError> {
    if len < ChunkHeader::SIZE || (len - ChunkHeader::SIZE) % SLOT_WIDTH != 0 {
        return Err(ChunkError::InvalidLayout { len });
    }
    Ok(())
}

/// A fixed-length chunk of integers stored as `(slot + bias) * scale`.
///
/// # Example
/// ```
/// use scale_bias_chunk::ScaleBiasChunk;
///
/// let mut chunk = ScaleBiasChunk::with_len(3, 0, 0.01).unwrap();
/// assert!(chunk.set_integer(0, 7));
/// assert!(chunk.is_missing(1));
/// assert_eq!(chunk.get_float(0), 7.0);
/// assert_eq!(chunk.get_integer(0).unwrap(), 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBiasChunk {
    bytes: ChunkBytes,
    scale: f64,
    bias: i64,
}

impl ScaleBiasChunk {
    /// Create a chunk over `buffer`, writing `scale` and `bias` into its header.
    ///
    /// The payload after the header is kept as is.
    pub fn new(buffer: Vec<u8>, bias: i64, scale: f64) -> Result<Self, ChunkError> {
        check_layout(buffer.len())?;
        let header = ChunkHeader::new(bias, scale)?;

        let mut bytes = ChunkBytes::new(buffer);
        header.write_to(&mut bytes);

        Ok(ScaleBiasChunk { bytes, scale, bias })
    }

    /// Allocate a chunk of `len` slots, all missing.
    pub fn with_len(len: usize, bias: i64, scale: f64) -> Result<Self, ChunkError> {
        let mut chunk = Self::new(vec![0; ChunkHeader::SIZE + len * SLOT_WIDTH], bias, scale)?;
        for i in 0..len {
            chunk.set_missing(i);
        }
        Ok(chunk)
    }

    /// Build a chunk from integers, `None` marking missing values.
    ///
    /// Fails on the first value that cannot be stored exactly.
    pub fn from_integers(
        values: &[Option<i64>],
        bias: i64,
        scale: f64,
    ) -> Result<Self, ChunkError> {
        let mut chunk = Self::with_len(values.len(), bias, scale)?;
        for (index, value) in values.iter().enumerate() {
            if let Some(value) = *value {
                if !chunk.set_integer(index, value) {
                    debug!(
                        "[from_integers] value {} at {} does not fit scale {} bias {}",
                        value, index, scale, bias
                    );
                    return Err(ChunkError::Unrepresentable { index, value });
                }
            }
        }
        Ok(chunk)
    }

    /// Open a serialized chunk, reading scale and bias from its header.
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, ChunkError> {
        check_layout(buffer.len())?;
        let bytes = ChunkBytes::new(buffer);
        let header = ChunkHeader::read_from(&bytes);
        header.validate()?;

        let chunk = ScaleBiasChunk {
            bytes,
            scale: header.scale,
            bias: header.bias,
        };
        debug!(
            "[from_bytes] len: {}, scale: {}, bias: {}",
            chunk.len(),
            chunk.scale,
            chunk.bias
        );
        Ok(chunk)
    }

    /// Re-read scale and bias from the header.
    pub fn parse_header(&mut self) -> Result<(), ChunkError> {
        let header = ChunkHeader::read_from(&self.bytes);
        header.validate()?;
        self.scale = header.scale;
        self.bias = header.bias;
        Ok(())
    }

    /// The decode multiplier.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The decode offset.
    #[inline]
    pub fn bias(&self) -> i64 {
        self.bias
    }

    /// The header fields.
    pub fn header(&self) -> ChunkHeader {
        ChunkHeader {
            scale: self.scale,
            bias: self.bias,
        }
    }

    /// The raw buffer, header included.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Give up the chunk and return its raw buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        (self.bytes.len() - ChunkHeader::SIZE) / SLOT_WIDTH
    }

    /// Whether the chunk has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn offset(&self, i: usize) -> usize {
        let len = self.len();
        assert!(i < len, "index {} out of bounds for chunk of length {}", i, len);
        ChunkHeader::SIZE + i * SLOT_WIDTH
    }

    #[inline]
    fn slot(&self, i: usize) -> i32 {
        self.bytes.read_i32(self.offset(i))
    }

    #[inline]
    fn decode(&self, raw: i32) -> f64 {
        i64::from(raw).wrapping_add(self.bias) as f64 * self.scale
    }

    /// Find the slot value for `value`, or `None` if it does not reverse cleanly.
    fn encode(&self, value: i64) -> Option<i32> {
        let res = match ((value as f64 / self.scale) as i64).checked_sub(self.bias) {
            Some(res) => res,
            None => {
                trace!("[encode] {} overflows bias {}", value, self.bias);
                return None;
            }
        };

        let decoded = (res + self.bias) as f64 * self.scale;
        if decoded as i64 != value {
            trace!("[encode] {} is lossy under scale {}", value, self.scale);
            return None;
        }
        // i32::MIN is the sentinel, so it is excluded along with everything below.
        if res <= i64::from(MISSING) || res > i64::from(i32::MAX) {
            trace!("[encode] {} needs slot {} outside i32", value, res);
            return None;
        }
        Some(res as i32)
    }

    /// The value at `i` truncated to an integer.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    pub fn get_integer(&self, i: usize) -> Result<i64, ChunkError> {
        let raw = self.slot(i);
        if raw == MISSING {
            return Err(ChunkError::MissingValue { index: i });
        }
        Ok(self.decode(raw) as i64)
    }

    /// The value at `i`, or `NaN` if missing.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    pub fn get_float(&self, i: usize) -> f64 {
        let raw = self.slot(i);
        if raw == MISSING {
            f64::NAN
        } else {
            self.decode(raw)
        }
    }

    /// Whether the slot at `i` holds the missing sentinel.
    pub fn is_missing(&self, i: usize) -> bool {
        self.slot(i) == MISSING
    }

    /// Whether the scale lets this chunk hold non-integral values.
    pub fn has_fractional(&self) -> bool {
        !is_integral(self.scale)
    }

    /// Store `value` at `i` if it survives encoding exactly.
    ///
    /// Returns `false` and leaves the slot unchanged otherwise.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    pub fn set_integer(&mut self, i: usize, value: i64) -> bool {
        let offset = self.offset(i);
        match self.encode(value) {
            Some(enc) => {
                self.bytes.write_i32(offset, enc);
                true
            }
            None => {
                trace!("[set_integer] rejected {} at {}", value, i);
                false
            }
        }
    }

    /// Always rejected: floating writes need a different encoding.
    pub fn set_float(&mut self, i: usize, _value: f64) -> bool {
        self.offset(i);
        false
    }

    /// Always rejected: floating writes need a different encoding.
    pub fn set_float32(&mut self, i: usize, _value: f32) -> bool {
        self.offset(i);
        false
    }

    /// Mark the slot at `i` as missing.
    pub fn set_missing(&mut self, i: usize) -> bool {
        let offset = self.offset(i);
        self.bytes.write_i32(offset, MISSING);
        true
    }

    /// Decode `[from, to)` into `out`, substituting `na` for missing slots.
    ///
    /// # Panics
    /// If the range is out of bounds or `out` is shorter than `to - from`.
    pub fn decode_range(&self, out: &mut [f64], from: usize, to: usize, na: f64) {
        assert!(
            from <= to && to <= self.len(),
            "range {}..{} out of bounds for chunk of length {}",
            from,
            to,
            self.len()
        );
        for (v, i) in out[..to - from].iter_mut().zip(from..to) {
            let raw = self.slot(i);
            *v = if raw == MISSING { na } else { self.decode(raw) };
        }
    }

    /// Decode the slots listed in `ids` into `out`, `NaN` for missing slots.
    ///
    /// # Panics
    /// If an index is out of bounds or `out` is shorter than `ids`.
    pub fn decode_indices(&self, out: &mut [f64], ids: &[usize]) {
        for (v, &i) in out[..ids.len()].iter_mut().zip(ids) {
            *v = self.get_float(i);
        }
    }

    fn expansion_exponent(&self) -> i32 {
        match decimal_exponent(self.scale) {
            Some(dx) => dx,
            None => panic!(
                "cannot expand chunk: scale {} is not an integral power of ten",
                self.scale
            ),
        }
    }

    #[inline]
    fn expand_one(&self, builder: &mut dyn ChunkBuilder, i: usize, dx: i32) {
        let raw = self.slot(i);
        if raw == MISSING {
            builder.append_missing();
        } else {
            builder.append_scaled(i64::from(raw).wrapping_add(self.bias), dx);
        }
    }

    /// Append `[from, to)` to `builder` as `(slot + bias) * 10^log10(scale)`.
    ///
    /// # Panics
    /// If the scale is not a power of ten.
    pub fn expand_range(&self, builder: &mut dyn ChunkBuilder, from: usize, to: usize) {
        let dx = self.expansion_exponent();
        for i in from..to {
            self.expand_one(builder, i, dx);
        }
    }

    /// Append the slots listed in `ids` to `builder`, in order.
    ///
    /// # Panics
    /// If the scale is not a power of ten.
    pub fn expand_indices(&self, builder: &mut dyn ChunkBuilder, ids: &[usize]) {
        let dx = self.expansion_exponent();
        for &i in ids {
            self.expand_one(builder, i, dx);
        }
    }

    /// Decimal places worth printing for this chunk's values.
    pub fn precision(&self) -> u8 {
        decimal_places(self.scale)
    }
}

impl ColumnChunk for ScaleBiasChunk {
    fn len(&self) -> usize {
        ScaleBiasChunk::len(self)
    }

    fn at(&self, i: usize) -> Result<i64, ChunkError> {
        self.get_integer(i)
    }

    fn at_f64(&self, i: usize) -> f64 {
        self.get_float(i)
    }

    fn is_missing(&self, i: usize) -> bool {
        ScaleBiasChunk::is_missing(self, i)
    }

    fn set_i64(&mut self, i: usize, value: i64) -> bool {
        self.set_integer(i, value)
    }

    fn set_f64(&mut self, i: usize, value: f64) -> bool {
        self.set_float(i, value)
    }

    fn set_f32(&mut self, i: usize, value: f32) -> bool {
        self.set_float32(i, value)
    }

    fn set_missing(&mut self, i: usize) -> bool {
        ScaleBiasChunk::set_missing(self, i)
    }

    fn decode_range(&self, out: &mut [f64], from: usize, to: usize, na: f64) {
        ScaleBiasChunk::decode_range(self, out, from, to, na)
    }

    fn decode_indices(&self, out: &mut [f64], ids: &[usize]) {
        ScaleBiasChunk::decode_indices(self, out, ids)
    }

    fn expand_range(&self, builder: &mut dyn ChunkBuilder, from: usize, to: usize) {
        ScaleBiasChunk::expand_range(self, builder, from, to)
    }

    fn expand_indices(&self, builder: &mut dyn ChunkBuilder, ids: &[usize]) {
        ScaleBiasChunk::expand_indices(self, builder, ids)
    }

    fn init_from_bytes(&mut self) -> Result<(), ChunkError> {
        self.parse_header()
    }

    fn precision(&self) -> u8 {
        ScaleBiasChunk::precision(self)
    }

    fn has_fractional(&self) -> bool {
        ScaleBiasChunk::has_fractional(self)
    }
}
