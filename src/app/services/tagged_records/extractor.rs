//! Extraction of `TAG ... tag` blocks from record files
//!
//! The extractor walks a token stream and yields the text between an opening
//! tag and the first closing tag after it. Tags are compared against whole
//! unquoted tokens, so `'PAVE area'` inside a name never opens or closes a block
//! and `PAVED` never matches `PAVE`.

use super::tokens::Tokens;
use crate::ParseError;
use serde::{Deserialize, Serialize};

/// How tags are compared with tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagCase {
    /// Opening tag as given (`PAVE`), closing tag as given (`pave`)
    Exact,
    /// Both tags compared ignoring ASCII case
    Insensitive,
}

/// What a reader does when a file has no block of its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingTagPolicy {
    /// Return no records
    Empty,
    /// Fail with [`ParseError::MissingTag`]
    Error,
}

/// Text of one tagged block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedBlock<'a> {
    /// Text between the tags, trimmed
    pub text: &'a str,

    /// 1-based line of the opening tag
    pub line: usize,
}

/// Finds blocks enclosed by one opening and one closing tag
#[derive(Debug, Clone)]
pub struct TaggedRecordExtractor {
    open_tag: String,
    close_tag: String,
    tag_case: TagCase,
}

impl TaggedRecordExtractor {
    /// Uppercase opening tag and lowercase closing tag, both compared ignoring
    /// case. Pass [`TagCase::Exact`] to [`Self::with_case`] to require the
    /// `TAG ... tag` spelling, as the Sobek RR reader does by default.
    pub fn new(tag: &str) -> Self {
        Self {
            open_tag: tag.to_ascii_uppercase(),
            close_tag: tag.to_ascii_lowercase(),
            tag_case: TagCase::Insensitive,
        }
    }

    /// Explicit opening and closing tags
    pub fn with_tags(open_tag: impl Into<String>, close_tag: impl Into<String>) -> Self {
        Self {
            open_tag: open_tag.into(),
            close_tag: close_tag.into(),
            tag_case: TagCase::Insensitive,
        }
    }

    /// Change how tags are compared
    pub fn with_case(mut self, tag_case: TagCase) -> Self {
        self.tag_case = tag_case;
        self
    }

    pub fn open_tag(&self) -> &str {
        &self.open_tag
    }

    /// Lazy sequence of blocks in file order
    pub fn blocks<'e, 'a>(&'e self, content: &'a str) -> TaggedBlocks<'e, 'a> {
        TaggedBlocks {
            extractor: self,
            content,
            tokens: Tokens::new(content),
            scanned_to: 0,
            line: 1,
            finished: false,
        }
    }

    /// All blocks, applying the missing-tag policy when there are none
    pub fn extract<'a>(
        &self,
        content: &'a str,
        policy: MissingTagPolicy,
    ) -> Result<Vec<TaggedBlock<'a>>, ParseError> {
        let blocks = self.blocks(content).collect::<Result<Vec<_>, _>>()?;
        if blocks.is_empty() && policy == MissingTagPolicy::Error {
            return Err(ParseError::MissingTag {
                tag: self.open_tag.clone(),
            });
        }
        Ok(blocks)
    }

    fn matches(&self, token: &str, tag: &str) -> bool {
        match self.tag_case {
            TagCase::Exact => token == tag,
            TagCase::Insensitive => token.eq_ignore_ascii_case(tag),
        }
    }
}

/// Iterator over the blocks of one text
pub struct TaggedBlocks<'e, 'a> {
    extractor: &'e TaggedRecordExtractor,
    content: &'a str,
    tokens: Tokens<'a>,
    scanned_to: usize,
    line: usize,
    finished: bool,
}

impl<'e, 'a> TaggedBlocks<'e, 'a> {
    fn line_at(&mut self, offset: usize) -> usize {
        self.line += self.content[self.scanned_to..offset].matches('\n').count();
        self.scanned_to = offset;
        self.line
    }
}

impl<'e, 'a> Iterator for TaggedBlocks<'e, 'a> {
    type Item = Result<TaggedBlock<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let open = loop {
            match self.tokens.next() {
                Some(token) if self.extractor.matches(token.text, &self.extractor.open_tag) => {
                    break token;
                }
                Some(_) => continue,
                None => {
                    self.finished = true;
                    return None;
                }
            }
        };
        let line = self.line_at(open.start);

        for token in self.tokens.by_ref() {
            if self.extractor.matches(token.text, &self.extractor.close_tag) {
                return Some(Ok(TaggedBlock {
                    text: self.content[open.end..token.start].trim(),
                    line,
                }));
            }
        }

        self.finished = true;
        Some(Err(ParseError::UnterminatedRecord {
            tag: self.extractor.open_tag.clone(),
            line,
        }))
    }
}
