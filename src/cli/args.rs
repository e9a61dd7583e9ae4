//! Command-line argument definitions for hydro-formats
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the hydro model file tool
///
/// Reads Sobek RR and D-Flow FM model files and reports their content.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hydro-formats",
    version,
    about = "Read and check Sobek RR and D-Flow FM model files",
    long_about = "Reads the structured text files of Sobek rainfall-runoff and D-Flow FM \
                  hydrodynamic models: tagged record files, polylines, polygons, sample points, \
                  time series and structures files. Reports their content in human readable \
                  form or as JSON, and imports whole model directories at once."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Read one file of any supported kind and summarise it
    Inspect(InspectArgs),
    /// Read a structures file against a structure schema
    Structures(StructuresArgs),
    /// Import files, directories or glob patterns in one batch
    Import(ImportArgs),
}

/// Options shared by all subcommands
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// JSON configuration file
    ///
    /// Missing keys keep their defaults. Without this option the user
    /// configuration file is used when it exists.
    #[arg(long = "config", value_name = "FILE", help = "JSON configuration file")]
    pub config_file: Option<PathBuf>,

    /// Model reference date that time-series offsets are relative to
    #[arg(
        long = "reference-date",
        value_name = "DATE",
        value_parser = parse_reference_date,
        help = "Model reference date (YYYY-MM-DD, YYYYMMDD or YYYY-MM-DD HH:MM:SS)"
    )]
    pub reference_date: Option<NaiveDateTime>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format of the results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// File to read; its kind follows from its name or extension
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Structure schema, needed for `.ini` structures files
    #[arg(long = "schema", value_name = "CSV")]
    pub schema: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the structures command
#[derive(Debug, Clone, Parser)]
pub struct StructuresArgs {
    /// Structures `.ini` file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Structure schema CSV
    ///
    /// Defaults to the `structure-properties.csv` shipped with the crate.
    #[arg(long = "schema", value_name = "CSV")]
    pub schema: Option<PathBuf>,

    /// Write the structures read back to this file, with companion files next to it
    #[arg(long = "write", value_name = "FILE")]
    pub write_path: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Files, directories or glob patterns to import
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Structure schema; without it structures files are skipped
    #[arg(long = "schema", value_name = "CSV")]
    pub schema: Option<PathBuf>,

    /// Only import the top level of directories
    #[arg(long = "no-recursive")]
    pub no_recursive: bool,

    /// Stop at the first file that fails
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Inspect(args) => &args.common,
            Commands::Structures(args) => &args.common,
            Commands::Import(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (human output, not quiet)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Validate the shared arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config_file {
            if !path.is_file() {
                return Err(Error::file_not_found(path.display().to_string()));
            }
        }
        Ok(())
    }
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            config_file: None,
            reference_date: None,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}

/// Parse a reference date with or without a time of day
pub fn parse_reference_date(text: &str) -> std::result::Result<NaiveDateTime, String> {
    let text = text.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y%m%d%H%M%S"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date_time);
        }
    }
    for format in ["%Y-%m-%d", "%Y%m%d"] {
        if let Some(date_time) = NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(date_time);
        }
    }
    Err(format!(
        "Invalid reference date '{}', expected YYYY-MM-DD, YYYYMMDD or YYYY-MM-DD HH:MM:SS",
        text
    ))
}
