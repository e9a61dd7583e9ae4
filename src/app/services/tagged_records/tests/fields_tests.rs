//! Tests for labelled field lookups

use crate::ParseError;
use crate::app::services::tagged_records::{
    RecordFields, get_array, get_int, get_quoted_string, get_scalar,
};

const UNPAVED: &str = "id 'upGFE820' na 16 ga 99826 ar 99392 0 0 0 196 238 0 0 0 0 0 0 0 0 0 0 su 0 '' lv -0.18 co 3 ad '' rc 0 ed 'Drain1' sp 'GFE820' ic 'INF1' sd 'STOR1' ig 0  1.07 gl 2 bt 115 is 2566.2 ms 'Station1' aaf 1";

#[test]
fn test_get_scalar() {
    assert_eq!(get_scalar("ga", UNPAVED), Some(99826.0));
    assert_eq!(get_scalar("lv", UNPAVED), Some(-0.18));
    assert_eq!(get_scalar("is", UNPAVED), Some(2566.2));
    assert_eq!(get_scalar("xx", UNPAVED), None);
}

#[test]
fn test_get_scalar_quoted_value_is_not_a_number() {
    assert_eq!(get_scalar("sp", UNPAVED), None);
}

#[test]
fn test_get_scalar_scientific_notation() {
    assert_eq!(get_scalar("ar", "ar 1.5E+03 lv 1.0d-1"), Some(1500.0));
    assert_eq!(get_scalar("lv", "ar 1.5E+03 lv 1.0d-1"), Some(0.1));
}

#[test]
fn test_get_array_exact_count() {
    let areas = get_array("ar", UNPAVED, 16).unwrap();
    assert_eq!(areas.len(), 16);
    assert_eq!(areas[0], 99392.0);
    assert_eq!(areas[4], 196.0);
    assert_eq!(areas[5], 238.0);

    assert_eq!(get_array("ig", UNPAVED, 2), Some(vec![0.0, 1.07]));
}

#[test]
fn test_get_array_count_mismatch() {
    assert_eq!(get_array("ar", UNPAVED, 17), None);
    assert_eq!(get_array("ar", UNPAVED, 15), None);
    assert_eq!(get_array("ig", UNPAVED, 1), None);
}

#[test]
fn test_get_quoted_string() {
    assert_eq!(get_quoted_string("id", UNPAVED).as_deref(), Some("upGFE820"));
    assert_eq!(get_quoted_string("ms", UNPAVED).as_deref(), Some("Station1"));
    assert_eq!(get_quoted_string("ad", UNPAVED).as_deref(), Some(""));
    assert_eq!(get_quoted_string("na", UNPAVED), None);
    assert_eq!(
        get_quoted_string("nm", "id 'x' nm 'Kwel GFE820' co 5").as_deref(),
        Some("Kwel GFE820")
    );
}

#[test]
fn test_label_inside_quotes_is_not_a_label() {
    let text = "id 'ar 5' ar 7";
    assert_eq!(get_scalar("ar", text), Some(7.0));
}

#[test]
fn test_get_int() {
    assert_eq!(get_int("co", UNPAVED), Some(3));
    assert_eq!(get_int("bt", UNPAVED), Some(115));
    assert_eq!(get_int("lv", UNPAVED), None);
}

#[test]
fn test_required_fields() {
    let fields = RecordFields::new("STDF", 4, "nm 'x' ml abc");
    assert_eq!(
        fields.require_quoted("id").unwrap_err(),
        ParseError::MissingField {
            tag: "STDF".to_string(),
            field: "id".to_string(),
            line: 4
        }
    );
    assert!(matches!(
        fields.require_scalar("ml"),
        Err(ParseError::InvalidField { .. })
    ));
}

#[test]
fn test_has_and_text() {
    let fields = RecordFields::new("NODE", 1, "id '1' mt 1 '6' px 10");
    assert!(fields.has("mt"));
    assert!(!fields.has("py"));
    assert_eq!(fields.text("px").as_deref(), Some("10"));
}

#[test]
fn test_count_is_bounded_by_block_size() {
    let fields = RecordFields::new("UNPV", 7, UNPAVED);
    assert_eq!(fields.count("na"), Ok(16));
    assert_eq!(fields.count("xx"), Ok(0));

    let fields = RecordFields::new("UNPV", 7, "id 'u' na 2000000000 ar 1 2");
    assert_eq!(
        fields.count("na"),
        Err(ParseError::InvalidField {
            tag: "UNPV".to_string(),
            field: "na".to_string(),
            value: "2000000000".to_string(),
            line: 7
        })
    );
}
