//! Test utilities and fixtures for geometry file testing

use std::io::Write;
use tempfile::NamedTempFile;

mod points_tests;

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Two weirs, the second split into sub-features by a separator row
pub fn create_pli_content() -> String {
    r#"* weirs of the harbour model
weir01
    2    2
1.000000000000000E+001  2.000000000000000E+001
3.000000000000000E+001  4.000000000000000E+001

dike
    5    3
0.0 0.0 1.5
1.0 0.0 1.6
-999 -999 -999
5.0 5.0 2.0
6.0 5.0 2.1
"#
    .to_string()
}

/// A square polygon without its closing coordinate
pub fn create_pol_content() -> String {
    r#"poly_1
    4    2
0.0 0.0
10.0 0.0
10.0 10.0
0.0 10.0
"#
    .to_string()
}
