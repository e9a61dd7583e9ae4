//! Tests for `.tim` reading and writing

use super::*;
use crate::Error;
use crate::app::services::timeseries_files::TimFile;
use chrono::Duration;

#[test]
fn test_read_tim_file() {
    let temp_file = create_temp_file(&create_tim_content());
    let series = TimFile::new(reference_date()).read(temp_file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.component_count(), 2);
    assert_eq!(series.times()[0], reference_date());
    assert_eq!(series.times()[1], reference_date() + Duration::hours(1));
    assert_eq!(series.times()[2], reference_date() + Duration::seconds(120 * 60 + 30));
    assert_eq!(series.component(0), vec![1.5, 2.0, 2.25]);
    assert_eq!(series.component(1), vec![10.0, 10.0, 12.0]);
}

#[test]
fn test_inconsistent_column_count() {
    let result = TimFile::new(reference_date()).parse_content("0 1 2\n10 1\n", "bad.tim");
    match result {
        Err(Error::Format { file, line, message }) => {
            assert_eq!(file, "bad.tim");
            assert_eq!(line, 2);
            assert_eq!(message, "Expected 2 values, but found 1");
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_times_must_increase() {
    let result = TimFile::new(reference_date()).parse_content("* c\n10 1\n10 2\n", "bad.tim");
    assert!(matches!(result, Err(Error::Format { line: 3, .. })));
}

#[test]
fn test_row_without_values() {
    let result = TimFile::new(reference_date()).parse_content("10\n", "bad.tim");
    assert!(matches!(result, Err(Error::Format { line: 1, .. })));
}

#[test]
fn test_invalid_number() {
    let result = TimFile::new(reference_date()).parse_content("0 1\n1 one\n", "bad.tim");
    match result {
        Err(Error::Format { line, message, .. }) => {
            assert_eq!(line, 2);
            assert!(message.contains("'one'"));
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_empty_file_gives_empty_series() {
    let series = TimFile::new(reference_date()).parse_content("* nothing\n", "empty.tim").unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_write_with_comments() {
    let tim = TimFile::new(reference_date());
    let series = tim.parse_content("0 1.5\n90 -2\n", "in.tim").unwrap();

    let mut output = Vec::new();
    tim.write_to(&mut output, &series, &["pump01 capacity".to_string()])
        .unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "* pump01 capacity\n0  1.5\n90  -2\n"
    );
}

#[test]
fn test_file_round_trip() {
    let tim = TimFile::new(reference_date());
    let series = tim.parse_content(&create_tim_content(), "in.tim").unwrap();

    let temp_file = create_temp_file("");
    tim.write(temp_file.path(), &series, &[]).unwrap();
    assert_eq!(tim.read(temp_file.path()).unwrap(), series);
}

#[test]
fn test_minutes_conversion() {
    let tim = TimFile::new(reference_date());
    let time = tim.time_at(1.5).unwrap();
    assert_eq!(time, reference_date() + Duration::seconds(90));
    assert_eq!(tim.minutes_since_reference(time), 1.5);
}

#[test]
fn test_huge_time_offset_is_format_error() {
    let tim = TimFile::new(reference_date());
    assert!(matches!(
        tim.parse_content("1e15 1.0\n", "huge.tim"),
        Err(Error::Format { line: 1, .. })
    ));
    assert!(matches!(
        tim.parse_content("0 1.0\ninf 1.0\n", "infinite.tim"),
        Err(Error::Format { line: 2, .. })
    ));
    assert!(tim.time_at(f64::NAN).is_none());
}
