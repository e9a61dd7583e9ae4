//! Tokenization of tagged record text
//!
//! A token is either a single-quoted string (quotes included, may contain
//! whitespace) or a run of non-whitespace characters. Tags and field labels are
//! only ever matched against whole unquoted tokens.

use regex::{Matches, Regex};
use std::sync::OnceLock;

const TOKEN_PATTERN: &str = r"'[^']*'|\S+";

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// One token and its byte offsets in the scanned text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    /// Whether the token is a single-quoted string
    pub fn is_quoted(&self) -> bool {
        self.text.len() >= 2 && self.text.starts_with('\'') && self.text.ends_with('\'')
    }

    /// Token text without surrounding quotes
    pub fn unquoted(&self) -> &'a str {
        if self.is_quoted() {
            &self.text[1..self.text.len() - 1]
        } else {
            self.text
        }
    }
}

/// Lazy token stream over a text
pub struct Tokens<'a> {
    matches: Matches<'static, 'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            matches: token_regex().find_iter(text),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
    }
}
