//! Tests for `.t3d` reading and writing

use super::*;
use crate::Error;
use crate::app::services::timeseries_files::{LayerType, T3dFile};
use chrono::{Duration, FixedOffset};

#[test]
fn test_read_t3d_file() {
    let temp_file = create_temp_file(&create_t3d_content());
    let data = T3dFile.read(temp_file.path()).unwrap();

    assert_eq!(data.layer_type, LayerType::Sigma);
    assert_eq!(data.layers, vec![0.0, 0.5, 1.0]);
    assert_eq!(data.vector_max, 2);
    assert_eq!(data.time_zone, FixedOffset::east_opt(3600));
    assert_eq!(data.series.component_count(), 6);
    assert_eq!(data.series.times(), &[reference_date(), reference_date() + Duration::hours(2)]);
    assert_eq!(data.layer_values(1, 0), vec![3.0, 3.5]);
    assert_eq!(data.layer_values(2, 1), vec![6.0, 6.5]);
}

#[test]
fn test_vectormax_defaults_to_one() {
    let content = "LAYER_TYPE = Z\nLAYERS = -5 -2\nTIME = 30 seconds since 2001-01-01 00:00:00\n1 2\n";
    let data = T3dFile.parse_content(content, "z.t3d").unwrap();

    assert_eq!(data.layer_type, LayerType::Z);
    assert_eq!(data.vector_max, 1);
    assert_eq!(data.time_zone, None);
    assert_eq!(data.series.times()[0], reference_date() + Duration::seconds(30));
}

#[test]
fn test_missing_layers_header() {
    let content = "LAYER_TYPE = SIGMA\nTIME = 0 minutes since 2001-01-01 00:00:00\n1\n";
    let result = T3dFile.parse_content(content, "bad.t3d");
    match result {
        Err(Error::Format { message, .. }) => assert_eq!(message, "Missing LAYERS header"),
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_layers_must_ascend() {
    let content = "LAYER_TYPE = SIGMA\nLAYERS = 1.0 0.5\n";
    let result = T3dFile.parse_content(content, "bad.t3d");
    assert!(matches!(result, Err(Error::Format { line: 2, .. })));
}

#[test]
fn test_wrong_value_count() {
    let content = "LAYER_TYPE = SIGMA\nLAYERS = 0 1\nTIME = 0 minutes since 2001-01-01 00:00:00\n1 2 3\n";
    let result = T3dFile.parse_content(content, "bad.t3d");
    match result {
        Err(Error::Format { message, .. }) => assert!(message.contains("Expected 2 values")),
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_invalid_time_line() {
    let content = "LAYER_TYPE = SIGMA\nLAYERS = 0 1\nTIME = 0 fortnights since 2001-01-01 00:00:00\n1 2\n";
    let result = T3dFile.parse_content(content, "bad.t3d");
    assert!(matches!(result, Err(Error::Format { line: 3, .. })));
}

#[test]
fn test_write_and_read_back() {
    let data = T3dFile.parse_content(&create_t3d_content(), "in.t3d").unwrap();

    let mut output = Vec::new();
    T3dFile.write_to(&mut output, &data, reference_date()).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.starts_with("LAYER_TYPE = SIGMA\nLAYERS = 0 0.5 1\nVECTORMAX = 2\n"));
    assert!(text.contains("TIME = 120 minutes since 2001-01-01 00:00:00 +01:00\n"));
    assert_eq!(T3dFile.parse_content(&text, "out.t3d").unwrap(), data);
}

#[test]
fn test_out_of_range_time_is_format_error() {
    for time in ["1e15 days", "inf minutes", "nan hours"] {
        let content = format!(
            "LAYER_TYPE = SIGMA\nLAYERS = 0 1\nTIME = {} since 2001-01-01 00:00:00\n1 2\n",
            time
        );
        let result = T3dFile.parse_content(&content, "far.t3d");
        assert!(
            matches!(result, Err(Error::Format { line: 3, .. })),
            "{} gave {:?}",
            time,
            result
        );
    }
}
