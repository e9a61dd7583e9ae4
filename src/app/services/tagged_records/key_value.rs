//! `key = value # comment` line splitting

use crate::ParseError;
use serde::Serialize;

/// The three parts of a property line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValueComment {
    pub key: String,
    pub value: String,
    /// Empty when the line has no comment
    pub comment: String,
}

/// Split a property line at the first `=` and the first `#` after it
pub fn parse_key_value_comment(line: &str) -> Result<KeyValueComment, ParseError> {
    let (key, rest) = line
        .split_once('=')
        .ok_or_else(|| ParseError::MalformedKeyValue {
            text: line.to_string(),
            reason: "no '=' separator".to_string(),
        })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::MalformedKeyValue {
            text: line.to_string(),
            reason: "empty key".to_string(),
        });
    }

    let (value, comment) = match rest.split_once('#') {
        Some((value, comment)) => (value.trim(), comment.trim()),
        None => (rest.trim(), ""),
    };

    Ok(KeyValueComment {
        key: key.to_string(),
        value: value.to_string(),
        comment: comment.to_string(),
    })
}
