//! Culture-invariant number parsing and formatting
//!
//! Rust's float parsing and formatting never consult the host locale, so these
//! helpers only deal with the notations found in model files: Fortran `d`
//! exponents on input and fixed 15-digit scientific notation on output.

use chrono::{Duration, NaiveDateTime};

use crate::constants::FIXED_FIELD_WIDTH;

/// Parse a floating point number, accepting `d`/`D` as exponent marker
pub fn parse_f64(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }

    if trimmed.contains(['d', 'D']) {
        return trimmed.replace(['d', 'D'], "e").parse::<f64>().ok();
    }

    None
}

/// Parse an integer, also accepting integral values written as floats (`3.0`)
pub fn parse_i32(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i32>() {
        return Some(value);
    }

    parse_f64(trimmed)
        .filter(|value| value.fract() == 0.0 && value.abs() <= i32::MAX as f64)
        .map(|value| value as i32)
}

/// Shortest representation that parses back to the same value
pub fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{}", value)
}

/// Scientific notation with 15 decimals and a signed three-digit exponent,
/// e.g. `1.000000000000000E+003`
pub fn format_e15(value: f64) -> String {
    if !value.is_finite() {
        return format_f64(value);
    }

    let formatted = format!("{:.15E}", value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:03}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// Right-aligned scientific value in a fixed-width field
pub fn format_fixed_width(value: f64) -> String {
    format!("{:>width$}", format_e15(value), width = FIXED_FIELD_WIDTH)
}

/// Offset a date by `amount` units of `milliseconds_per_unit`, rounded to
/// whole milliseconds. `None` when the amount is not finite or the result
/// falls outside the representable date range.
pub fn offset_date(
    reference: NaiveDateTime,
    amount: f64,
    milliseconds_per_unit: f64,
) -> Option<NaiveDateTime> {
    let milliseconds = (amount * milliseconds_per_unit).round();
    if !milliseconds.is_finite() || milliseconds.abs() >= i64::MAX as f64 {
        return None;
    }
    let offset = Duration::try_milliseconds(milliseconds as i64)?;
    reference.checked_add_signed(offset)
}
