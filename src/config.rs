//! Configuration management and validation.
//!
//! Provides the reader configuration shared by the file readers, the
//! structure conversion and the batch importer, with JSON loading and
//! builder-style overrides.

use crate::app::services::tagged_records::{MissingTagPolicy, TagCase};
use crate::constants::{
    DEFAULT_REFERENCE_DATE, PROGRESS_LINE_INTERVAL, structure_file,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for all readers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Model reference date that `.tim` offsets and breach start times are relative to
    pub reference_date: NaiveDateTime,

    /// Sobek RR record extraction settings
    pub sobek: SobekConfig,

    /// Geometry file settings
    pub geometry: GeometryConfig,

    /// Structures file settings
    pub structures: StructuresConfig,

    /// Batch import settings
    pub import: ImportConfig,
}

/// Sobek RR record extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SobekConfig {
    /// How opening and closing tags are compared
    pub tag_case: TagCase,

    /// What a reader does when a file holds no record of its tag
    pub missing_tag_policy: MissingTagPolicy,
}

/// Geometry file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Write the closing coordinate of `.pol` rings
    pub include_closing_coordinate: bool,

    /// Lines between two progress reports
    pub progress_interval: usize,
}

/// Structures file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuresConfig {
    /// Reject files without a `[General]` header instead of warning
    pub require_general_header: bool,

    /// Highest accepted major file version
    pub supported_major_version: u32,

    /// Highest accepted minor file version for the supported major version
    pub supported_minor_version: u32,
}

/// Batch import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Descend into sub-directories of directory inputs
    pub recursive: bool,

    /// Continue with the next file after a file fails
    pub continue_on_error: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        let reference_date =
            NaiveDateTime::parse_from_str(DEFAULT_REFERENCE_DATE, "%Y-%m-%d %H:%M:%S")
                .unwrap_or_default();

        Self {
            reference_date,
            sobek: SobekConfig::default(),
            geometry: GeometryConfig::default(),
            structures: StructuresConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for SobekConfig {
    fn default() -> Self {
        Self {
            tag_case: TagCase::Exact,
            missing_tag_policy: MissingTagPolicy::Empty,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            include_closing_coordinate: true,
            progress_interval: PROGRESS_LINE_INTERVAL,
        }
    }
}

impl Default for StructuresConfig {
    fn default() -> Self {
        Self {
            require_general_header: true,
            supported_major_version: structure_file::SUPPORTED_MAJOR_VERSION,
            supported_minor_version: structure_file::SUPPORTED_MINOR_VERSION,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            continue_on_error: true,
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a JSON file, missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default location of the user configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("hydro-formats").join("config.json"))
            .ok_or_else(|| Error::configuration("Cannot determine user config directory"))
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.geometry.progress_interval == 0 {
            return Err(Error::configuration(
                "Progress interval must be greater than 0",
            ));
        }

        if self.structures.supported_major_version == 0 {
            return Err(Error::configuration(
                "Supported structures file major version must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Create configuration with a custom reference date
    pub fn with_reference_date(mut self, reference_date: NaiveDateTime) -> Self {
        self.reference_date = reference_date;
        self
    }

    /// Create configuration that writes or omits the closing `.pol` coordinate
    pub fn with_closing_coordinate(mut self, include: bool) -> Self {
        self.geometry.include_closing_coordinate = include;
        self
    }

    /// Create configuration with a custom tag comparison
    pub fn with_tag_case(mut self, tag_case: TagCase) -> Self {
        self.sobek.tag_case = tag_case;
        self
    }

    /// Create configuration with a custom missing-tag policy
    pub fn with_missing_tag_policy(mut self, policy: MissingTagPolicy) -> Self {
        self.sobek.missing_tag_policy = policy;
        self
    }

    /// Create configuration that only warns about a missing `[General]` header
    pub fn without_general_header_requirement(mut self) -> Self {
        self.structures.require_general_header = false;
        self
    }

    /// Create configuration that only imports the top level of directories
    pub fn without_recursion(mut self) -> Self {
        self.import.recursive = false;
        self
    }

    /// Create configuration that stops a batch at the first failing file
    pub fn with_fail_fast(mut self) -> Self {
        self.import.continue_on_error = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(
            config.reference_date.format("%Y-%m-%d").to_string(),
            "2000-01-01"
        );
        assert!(config.structures.require_general_header);
        assert_eq!(config.structures.supported_major_version, 2);
        assert_eq!(config.geometry.progress_interval, 100);
        assert_eq!(config.sobek.tag_case, TagCase::Exact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ReaderConfig::default()
            .with_closing_coordinate(false)
            .without_general_header_requirement()
            .with_missing_tag_policy(MissingTagPolicy::Error);

        assert!(!config.geometry.include_closing_coordinate);
        assert!(!config.structures.require_general_header);
        assert_eq!(config.sobek.missing_tag_policy, MissingTagPolicy::Error);
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"reference_date": "2021-03-04T00:00:00", "geometry": {{"include_closing_coordinate": false}}}}"#
        )
        .unwrap();

        let config = ReaderConfig::load(file.path()).unwrap();
        assert_eq!(
            config.reference_date.format("%Y%m%d").to_string(),
            "20210304"
        );
        assert!(!config.geometry.include_closing_coordinate);
        assert_eq!(config.geometry.progress_interval, 100);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = ReaderConfig::default();
        config.geometry.progress_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ReaderConfig::load(Path::new("/nonexistent/hydro/config.json"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
