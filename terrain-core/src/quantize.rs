use crate::error::ConvertError;

/// Fixed-point scale applied to every axis. Always 0.01, never derived from
/// the input.
pub const SCALE: f64 = 0.01;

/// Quantize a raw coordinate into the fixed-point 32-bit integer stored in a
/// point record.
///
/// Division by [`SCALE`] with truncation toward zero, offset 0. Truncation
/// (not rounding) is the historical behavior and biases negative
/// coordinates; it must stay as-is for output compatibility. A quotient
/// outside the `i32` range fails instead of silently wrapping.
pub fn quantize(raw: f64, axis: &'static str) -> Result<i32, ConvertError> {
    let scaled = (raw / SCALE).trunc();
    if !scaled.is_finite() || scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
        return Err(ConvertError::Range { axis, value: raw });
    }
    Ok(scaled as i32)
}
