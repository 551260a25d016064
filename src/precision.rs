//! Decimal precision derived from a chunk scale.
//!
//! A scale of `10^-k` stores values with `k` decimal places. These helpers turn
//! a scale into that digit count for formatting, and into the decimal exponent
//! used when expanding a chunk into a builder.

/// Distance from an integer under which a `log10` result counts as integral.
pub const INT_TOLERANCE: f64 = 1e-8;

#[inline]
fn snap(x: f64) -> Option<f64> {
    let r = x.round();
    if (x - r).abs() < INT_TOLERANCE {
        Some(r)
    } else {
        None
    }
}

/// Whether `scale` is a whole number, i.e. the chunk cannot hold fractions.
#[inline]
pub fn is_integral(scale: f64) -> bool {
    scale == scale.trunc()
}

/// Number of decimal places implied by `scale`, clamped to be non-negative.
///
/// # Example
/// ```
/// use scale_bias_chunk::precision::decimal_places;
///
/// assert_eq!(decimal_places(1.0), 0);
/// assert_eq!(decimal_places(0.001), 3);
/// assert_eq!(decimal_places(0.05), 2);
/// assert_eq!(decimal_places(100.0), 0);
/// ```
pub fn decimal_places(scale: f64) -> u8 {
    let digits = -scale.abs().log10();
    if !digits.is_finite() {
        return 0;
    }
    let digits = snap(digits).unwrap_or_else(|| digits.ceil());
    digits.clamp(0.0, u8::MAX as f64) as u8
}

/// The integer `e` with `10^e == scale`, if there is one.
///
/// Returns `None` for scales that are not a power of ten, including negative
/// scales.
pub fn decimal_exponent(scale: f64) -> Option<i32> {
    let dx = snap(scale.log10())?;
    if dx < i32::MIN as f64 || dx > i32::MAX as f64 {
        return None;
    }
    Some(dx as i32)
}
