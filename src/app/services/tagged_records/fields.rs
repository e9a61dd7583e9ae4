//! Labelled field extraction from the text of one tagged block
//!
//! Fields follow the `label value...` convention of Sobek record files, e.g.
//! `id 'S1' nm 'Storage1' ml 5.0 il 0.0`. Labels are matched against whole
//! unquoted tokens only, and the first occurrence wins.

use super::tokens::{Token, Tokens};
use crate::ParseError;
use crate::app::services::text_reader::{parse_f64, parse_i32};

/// Tokenized block text with labelled lookups
#[derive(Debug, Clone)]
pub struct RecordFields<'a> {
    tag: &'a str,
    line: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> RecordFields<'a> {
    /// Tokenize the text of a block; `tag` and `line` locate errors
    pub fn new(tag: &'a str, line: usize, text: &'a str) -> Self {
        Self {
            tag,
            line,
            tokens: Tokens::new(text).collect(),
        }
    }

    /// Tokens after the first unquoted occurrence of `label`
    fn after(&self, label: &str) -> Option<&[Token<'a>]> {
        self.tokens
            .iter()
            .position(|token| !token.is_quoted() && token.text == label)
            .map(|index| &self.tokens[index + 1..])
    }

    /// Whether the label occurs in the block
    pub fn has(&self, label: &str) -> bool {
        self.after(label).is_some()
    }

    /// Number following `label`
    pub fn scalar(&self, label: &str) -> Option<f64> {
        self.after(label)
            .and_then(|rest| rest.first())
            .filter(|token| !token.is_quoted())
            .and_then(|token| parse_f64(token.text))
    }

    /// Integer following `label`
    pub fn int(&self, label: &str) -> Option<i32> {
        self.after(label)
            .and_then(|rest| rest.first())
            .filter(|token| !token.is_quoted())
            .and_then(|token| parse_i32(token.text))
    }

    /// Element count following `label`, zero when absent or negative
    ///
    /// A block can not hold more elements than it has tokens, so a larger
    /// count is an invalid field.
    pub fn count(&self, label: &str) -> Result<usize, ParseError> {
        let count = self.int(label).unwrap_or(0).max(0) as usize;
        if count > self.tokens.len() {
            return Err(ParseError::InvalidField {
                tag: self.tag.to_string(),
                field: label.to_string(),
                value: count.to_string(),
                line: self.line,
            });
        }
        Ok(count)
    }

    /// Exactly `count` numbers following `label`
    ///
    /// The run of numbers after the label must have exactly `count` elements,
    /// a shorter or longer run yields none.
    pub fn array(&self, label: &str, count: usize) -> Option<Vec<f64>> {
        let rest = self.after(label)?;
        let values: Vec<f64> = rest
            .iter()
            .take_while(|token| !token.is_quoted())
            .map_while(|token| parse_f64(token.text))
            .take(count + 1)
            .collect();

        (values.len() == count).then_some(values)
    }

    /// Single-quoted text following `label`, quotes removed
    pub fn quoted(&self, label: &str) -> Option<String> {
        self.after(label)
            .and_then(|rest| rest.first())
            .filter(|token| token.is_quoted())
            .map(|token| token.unquoted().to_string())
    }

    /// Quoted text or bare token following `label`
    pub fn text(&self, label: &str) -> Option<String> {
        self.after(label)
            .and_then(|rest| rest.first())
            .map(|token| token.unquoted().to_string())
    }

    /// Up to `count` tokens following `label`, quotes removed
    pub fn tokens_after(&self, label: &str, count: usize) -> Option<Vec<String>> {
        self.after(label).map(|rest| {
            rest.iter()
                .take(count)
                .map(|token| token.unquoted().to_string())
                .collect()
        })
    }

    /// Quoted text that every record of this kind must carry
    pub fn require_quoted(&self, label: &str) -> Result<String, ParseError> {
        self.quoted(label).ok_or_else(|| self.missing(label))
    }

    /// Number that every record of this kind must carry
    pub fn require_scalar(&self, label: &str) -> Result<f64, ParseError> {
        match self.after(label).and_then(|rest| rest.first()) {
            None => Err(self.missing(label)),
            Some(token) => parse_f64(token.text).ok_or_else(|| ParseError::InvalidField {
                tag: self.tag.to_string(),
                field: label.to_string(),
                value: token.text.to_string(),
                line: self.line,
            }),
        }
    }

    fn missing(&self, label: &str) -> ParseError {
        ParseError::MissingField {
            tag: self.tag.to_string(),
            field: label.to_string(),
            line: self.line,
        }
    }
}

/// Number following `label` in `text`
pub fn get_scalar(label: &str, text: &str) -> Option<f64> {
    RecordFields::new("", 0, text).scalar(label)
}

/// Exactly `count` numbers following `label` in `text`
pub fn get_array(label: &str, text: &str, count: usize) -> Option<Vec<f64>> {
    RecordFields::new("", 0, text).array(label, count)
}

/// Single-quoted text following `label` in `text`
pub fn get_quoted_string(label: &str, text: &str) -> Option<String> {
    RecordFields::new("", 0, text).quoted(label)
}

/// Integer following `label` in `text`
pub fn get_int(label: &str, text: &str) -> Option<i32> {
    RecordFields::new("", 0, text).int(label)
}
