//! Hydro Formats Library
//!
//! A Rust library for reading and writing the structured text files used by
//! Sobek rainfall-runoff and D-Flow FM hydrodynamic models.
//!
//! This library provides tools for:
//! - Extracting `TAG ... tag` records from legacy Sobek RR files into typed records
//! - Reading and writing `.pli`, `.pliz`, `.pol`, `.xyz` and `.xyn` geometry files
//! - Reading and writing `.tim` and `.t3d` time-series files
//! - Loading CSV model-property schemas with typed value parsing
//! - Converting `.ini` structure definitions into pumps, weirs, gates and levee breaches
//! - Batch imports with progress reporting and cooperative cancellation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_import;
        pub mod geometry_files;
        pub mod ini;
        pub mod log_handler;
        pub mod model_schema;
        pub mod progress;
        pub mod sobek_rr;
        pub mod structures;
        pub mod tagged_records;
        pub mod text_reader;
        pub mod timeseries_files;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Coordinate, Feature2D, Geometry, Steerable, TimeSeries};
pub use config::ReaderConfig;

/// Result type alias for hydro file processing
pub type Result<T> = std::result::Result<T, Error>;

/// Structured failure raised while extracting records and fields from text
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A field every record of this kind must carry is absent
    #[error("missing required field '{field}' in {tag} record starting on line {line}")]
    MissingField {
        tag: String,
        field: String,
        line: usize,
    },

    /// A field is present but its value cannot be converted
    #[error("invalid value '{value}' for field '{field}' in {tag} record starting on line {line}")]
    InvalidField {
        tag: String,
        field: String,
        value: String,
        line: usize,
    },

    /// A `key = value # comment` line could not be split
    #[error("malformed key-value line '{text}': {reason}")]
    MalformedKeyValue { text: String, reason: String },

    /// An opening tag without its closing tag
    #[error("record {tag} starting on line {line} is not closed")]
    UnterminatedRecord { tag: String, line: usize },

    /// The reader requires at least one block of this tag
    #[error("no {tag} records found")]
    MissingTag { tag: String },
}

impl ParseError {
    /// Line of the record the error refers to
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingField { line, .. }
            | Self::InvalidField { line, .. }
            | Self::UnterminatedRecord { line, .. } => Some(*line),
            Self::MalformedKeyValue { .. } | Self::MissingTag { .. } => None,
        }
    }
}

/// Comprehensive error types for hydro file operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Malformed file content, always located by file and 1-based line
    #[error("{message} on line {line} of file {file}")]
    Format {
        file: String,
        line: usize,
        message: String,
    },

    /// Record or field extraction failed
    #[error("Parse error in file '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    /// CSV reading error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Model schema definition error
    #[error("Schema error in file '{file}' on line {line}: {message}")]
    Schema {
        file: String,
        line: usize,
        message: String,
    },

    /// Argument outside the accepted set of values
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Structure type that cannot be converted
    #[error("Cannot create structure '{name}': unsupported structure type '{structure_type}'")]
    InvalidStructureType {
        name: String,
        structure_type: String,
    },

    /// Required structure property absent and without a schema default
    #[error("Property '{property}' is required for structure '{structure}' (file {file})")]
    MissingProperty {
        structure: String,
        property: String,
        file: String,
    },

    /// Steerable mode that has no builder implementation
    #[error("Steerable mode '{mode}' is not supported for property '{property}'")]
    UnsupportedSteerableMode { property: String, mode: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Work stopped through a cancellation token
    #[error("Cancelled: {reason}")]
    Cancelled { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a format error located in a file
    pub fn format(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a parse error for a file
    pub fn parse(file: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            file: file.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a schema definition error
    pub fn schema(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Schema {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid structure type error
    pub fn invalid_structure_type(
        name: impl Into<String>,
        structure_type: impl Into<String>,
    ) -> Self {
        Self::InvalidStructureType {
            name: name.into(),
            structure_type: structure_type.into(),
        }
    }

    /// Create a missing property error
    pub fn missing_property(
        structure: impl Into<String>,
        property: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self::MissingProperty {
            structure: structure.into(),
            property: property.into(),
            file: file.into(),
        }
    }

    /// Create an unsupported steerable mode error
    pub fn unsupported_steerable_mode(
        property: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self::UnsupportedSteerableMode {
            property: property.into(),
            mode: mode.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// Whether a failed structure conversion only drops that structure
    ///
    /// Any other error kind aborts the whole structures file.
    pub fn is_recoverable_structure_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::FileNotFound { .. }
                | Self::Format { .. }
                | Self::Parse { .. }
                | Self::InvalidArgument { .. }
                | Self::InvalidStructureType { .. }
                | Self::MissingProperty { .. }
                | Self::DateTimeParsing { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
