//! Block accounting for one Sobek RR file
//!
//! Every tagged block found for the requested record kind is counted. A block
//! that could not be built keeps its reason, so the import log can point at
//! the offending line.

use std::fmt;

use crate::ParseError;

/// Records of one kind read from a file
#[derive(Debug, Clone)]
pub struct ParseResult<R> {
    /// Successfully built records in file order
    pub records: Vec<R>,

    pub stats: BlockStats,
}

/// A tagged block that did not become a record
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    pub reason: ParseError,
}

impl SkippedBlock {
    /// Line the block starts on, when the reason carries one
    pub fn line(&self) -> Option<usize> {
        self.reason.line()
    }
}

impl fmt::Display for SkippedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// Blocks of one tag encountered in a file
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStats {
    pub tag: &'static str,

    /// Blocks opened by the tag, built or not
    pub blocks: usize,

    /// Blocks skipped, in file order
    pub skipped: Vec<SkippedBlock>,
}

impl BlockStats {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            blocks: 0,
            skipped: Vec::new(),
        }
    }

    /// Count a block that became a record
    pub fn add_built(&mut self) {
        self.blocks += 1;
    }

    /// Count a block that was skipped
    pub fn add_skipped(&mut self, reason: ParseError) {
        self.blocks += 1;
        self.skipped.push(SkippedBlock { reason });
    }

    pub fn built(&self) -> usize {
        self.blocks - self.skipped.len()
    }

    /// Whether every block became a record
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
