//! Tagged record extraction for legacy Sobek files
//!
//! Sobek rainfall-runoff files store one record per `TAG ... tag` block, with
//! labelled fields inside the block:
//!
//! ```text
//! STDF id 'S1' nm 'Storage1' ml 5.0 il 0.0 stdf
//! ```
//!
//! ## Architecture
//!
//! - [`tokens`] - quoted-string aware tokenizer
//! - [`extractor`] - lazy block scan with per-reader tag case and missing-tag policy
//! - [`fields`] - scalar, array, integer and quoted-string lookups by label
//! - [`key_value`] - `key = value # comment` line splitting
//!
//! ## Usage
//!
//! ```rust
//! use hydro_formats::app::services::tagged_records::{RecordFields, TaggedRecordExtractor};
//!
//! let content = "STDF id 'S1' nm 'Storage1' ml 5.0 il 0.0 stdf";
//! let extractor = TaggedRecordExtractor::new("STDF");
//! for block in extractor.blocks(content) {
//!     let block = block.unwrap();
//!     let fields = RecordFields::new("STDF", block.line, block.text);
//!     assert_eq!(fields.quoted("id").as_deref(), Some("S1"));
//!     assert_eq!(fields.scalar("ml"), Some(5.0));
//! }
//! ```

pub mod extractor;
pub mod fields;
pub mod key_value;
pub mod tokens;

#[cfg(test)]
pub mod tests;

pub use extractor::{MissingTagPolicy, TagCase, TaggedBlock, TaggedRecordExtractor};
pub use fields::{RecordFields, get_array, get_int, get_quoted_string, get_scalar};
pub use key_value::{KeyValueComment, parse_key_value_comment};
