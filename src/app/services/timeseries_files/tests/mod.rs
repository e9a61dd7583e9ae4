//! Test utilities and fixtures for time-series file testing

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use tempfile::NamedTempFile;

mod t3d_tests;
mod tim_tests;

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

pub fn reference_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2001, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Two-component series with comments and a blank line
pub fn create_tim_content() -> String {
    r#"* crest level and width
# generated for testing
0       1.5   10
60      2.0   10

120.5   2.25  12
"#
    .to_string()
}

/// Sigma profile with two components per layer
pub fn create_t3d_content() -> String {
    r#"LAYER_TYPE = SIGMA
LAYERS = 0.0 0.5 1.0
VECTORMAX = 2
TIME = 0 minutes since 2001-01-01 00:00:00 +01:00
1 2 3 4 5 6
TIME = 2 hours since 2001-01-01 00:00:00 +01:00
1.5 2.5 3.5
4.5 5.5 6.5
"#
    .to_string()
}
