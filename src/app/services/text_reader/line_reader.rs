//! Line-oriented reading with 1-based line numbers
//!
//! Every reader in this crate walks its input through [`LineReader`], so all
//! format errors are located the same way.

use crate::constants::COMMENT_PREFIXES;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One trimmed input line and its 1-based position
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    /// Whitespace separated fields of the line
    pub fn fields(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Yields trimmed lines, optionally skipping blank and comment lines
///
/// The underlying file handle is owned by the reader and released when it is
/// dropped, on success and on early return alike.
pub struct LineReader<R> {
    reader: R,
    source_name: String,
    line_number: usize,
    skip_blank: bool,
    skip_comments: bool,
}

impl LineReader<BufReader<File>> {
    /// Open a file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path.display().to_string()),
            _ => Error::io(format!("Failed to open {}", path.display()), e),
        })?;

        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader; `source_name` is used in error messages
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            reader,
            source_name: source_name.into(),
            line_number: 0,
            skip_blank: false,
            skip_comments: false,
        }
    }

    /// Skip lines that are empty after trimming
    pub fn skip_blank_lines(mut self) -> Self {
        self.skip_blank = true;
        self
    }

    /// Skip lines starting with `*` or `#`
    pub fn skip_comment_lines(mut self) -> Self {
        self.skip_comments = true;
        self
    }

    /// Name of the input used in error messages
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of the line returned last, 0 before the first read
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Format error located at the current line
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::format(&self.source_name, self.line_number, message)
    }

    /// Next line that passes the skip settings, none at end of input
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        let mut buffer = String::new();
        loop {
            buffer.clear();
            let read = self.reader.read_line(&mut buffer).map_err(|e| {
                Error::io(
                    format!(
                        "Failed to read line {} of {}",
                        self.line_number + 1,
                        self.source_name
                    ),
                    e,
                )
            })?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let text = buffer.trim();
            if self.skip_blank && text.is_empty() {
                continue;
            }
            if self.skip_comments && is_comment(text) {
                continue;
            }

            return Ok(Some(Line {
                number: self.line_number,
                text: text.to_string(),
            }));
        }
    }

    /// Next line, or a format error naming `expected` at end of input
    pub fn require_line(&mut self, expected: &str) -> Result<Line> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(Error::format(
                &self.source_name,
                self.line_number + 1,
                format!("Unexpected end of file, expected {}", expected),
            )),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Whether a trimmed line is a full-line comment
pub fn is_comment(text: &str) -> bool {
    text.starts_with(COMMENT_PREFIXES)
}

/// Read a whole file into memory, mapping a missing file to [`Error::FileNotFound`]
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::file_not_found(path.display().to_string()),
        _ => Error::io(format!("Failed to read file {}", path.display()), e),
    })
}
