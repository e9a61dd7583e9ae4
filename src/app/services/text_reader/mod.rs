//! Text reading primitives shared by all file readers
//!
//! ## Architecture
//!
//! - [`line_reader`] - trimmed lines with 1-based numbers and comment skipping
//! - [`numbers`] - invariant number parsing (Fortran exponents) and fixed-width formatting
//!
//! ## Usage
//!
//! ```rust
//! use hydro_formats::app::services::text_reader::{LineReader, parse_f64};
//!
//! let input = "* header\n1.0d2 5\n";
//! let mut reader = LineReader::new(input.as_bytes(), "inline").skip_comment_lines();
//! let line = reader.next_line().unwrap().unwrap();
//! assert_eq!(line.number, 2);
//! assert_eq!(parse_f64(line.fields()[0]), Some(100.0));
//! ```

pub mod line_reader;
pub mod numbers;

#[cfg(test)]
pub mod tests;

pub use line_reader::{Line, LineReader, is_comment, read_file};
pub use numbers::{
    format_e15, format_f64, format_fixed_width, offset_date, parse_f64, parse_i32,
};
