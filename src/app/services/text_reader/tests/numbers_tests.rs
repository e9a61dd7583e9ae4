//! Tests for invariant number handling

use crate::app::services::text_reader::{
    format_e15, format_f64, format_fixed_width, offset_date, parse_f64, parse_i32,
};
use chrono::{Duration, NaiveDate};

#[test]
fn test_parse_plain_and_scientific() {
    assert_eq!(parse_f64("1.5"), Some(1.5));
    assert_eq!(parse_f64(" -2.5e-3 "), Some(-0.0025));
    assert_eq!(parse_f64("1E+003"), Some(1000.0));
    assert_eq!(parse_f64(".132"), Some(0.132));
}

#[test]
fn test_parse_fortran_exponent() {
    assert_eq!(parse_f64("1.0d2"), Some(100.0));
    assert_eq!(parse_f64("2.5D-1"), Some(0.25));
}

#[test]
fn test_parse_rejects_text() {
    assert_eq!(parse_f64(""), None);
    assert_eq!(parse_f64("data.tim"), None);
    assert_eq!(parse_f64("1,5"), None);
}

#[test]
fn test_parse_i32() {
    assert_eq!(parse_i32("3"), Some(3));
    assert_eq!(parse_i32("3.0"), Some(3));
    assert_eq!(parse_i32("3.5"), None);
    assert_eq!(parse_i32("x"), None);
}

#[test]
fn test_format_e15() {
    assert_eq!(format_e15(1000.0), "1.000000000000000E+003");
    assert_eq!(format_e15(-0.25), "-2.500000000000000E-001");
    assert_eq!(format_e15(0.0), "0.000000000000000E+000");
}

#[test]
fn test_format_fixed_width() {
    let field = format_fixed_width(1.0);
    assert_eq!(field.len(), 24);
    assert_eq!(field, "  1.000000000000000E+000");
}

#[test]
fn test_format_f64_is_invariant() {
    assert_eq!(format_f64(100.0), "100");
    assert_eq!(format_f64(0.1), "0.1");
    assert_eq!(format_f64(f64::NAN), "NaN");
}

#[test]
fn test_offset_date_rejects_unrepresentable_offsets() {
    let reference = NaiveDate::from_ymd_opt(2001, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    assert_eq!(
        offset_date(reference, 1.5, 60_000.0),
        Some(reference + Duration::seconds(90))
    );
    assert_eq!(
        offset_date(reference, -0.0004, 1_000.0),
        Some(reference)
    );
    for amount in [1e15, -1e15, 1e300, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        assert_eq!(offset_date(reference, amount, 60_000.0), None, "{}", amount);
    }
}
