//! File kind detection and input expansion

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::app::services::sobek_rr::SobekFileKind;
use crate::constants::{
    INI_EXTENSION, PLI_EXTENSION, PLIZ_EXTENSION, POL_EXTENSION, T3D_EXTENSION, TIM_EXTENSION,
    XYN_EXTENSION, XYZ_EXTENSION,
};
use crate::{Error, Result};

/// Kind of file the importer knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "format", content = "sobek_kind", rename_all = "snake_case")]
pub enum FileKind {
    /// Sobek RR tagged record file, recognized by its fixed name
    Sobek(SobekFileKind),
    Polyline,
    PolylineZ,
    Polygon,
    Samples,
    NamedPoints,
    TimeSeries,
    LayeredTimeSeries,
    Structures,
}

impl FileKind {
    /// Recognize a file by its Sobek RR name or its extension, ignoring case
    pub fn detect(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy();
        if let Some(kind) = SobekFileKind::from_file_name(&file_name) {
            return Some(Self::Sobek(kind));
        }

        let extension = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match extension.as_str() {
            PLI_EXTENSION => Some(Self::Polyline),
            PLIZ_EXTENSION => Some(Self::PolylineZ),
            POL_EXTENSION => Some(Self::Polygon),
            XYZ_EXTENSION => Some(Self::Samples),
            XYN_EXTENSION => Some(Self::NamedPoints),
            TIM_EXTENSION => Some(Self::TimeSeries),
            T3D_EXTENSION => Some(Self::LayeredTimeSeries),
            INI_EXTENSION => Some(Self::Structures),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sobek(kind) => write!(f, "Sobek RR {:?}", kind),
            Self::Polyline => write!(f, "polyline"),
            Self::PolylineZ => write!(f, "polyline with z"),
            Self::Polygon => write!(f, "polygon"),
            Self::Samples => write!(f, "samples"),
            Self::NamedPoints => write!(f, "named points"),
            Self::TimeSeries => write!(f, "time series"),
            Self::LayeredTimeSeries => write!(f, "layered time series"),
            Self::Structures => write!(f, "structures"),
        }
    }
}

/// Expand input paths into the list of files to import
///
/// Directories contribute their recognized files in name order, glob patterns
/// their matches. Other paths are kept as given, so a missing file is reported
/// by the import instead of disappearing.
pub fn collect_files(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            files.extend(scan_directory(input, recursive)?);
        } else if is_pattern(input) {
            files.extend(expand_pattern(input)?);
        } else {
            files.push(input.clone());
        }
    }

    debug!("Collected {} files from {} inputs", files.len(), inputs.len());
    Ok(files)
}

fn scan_directory(directory: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(directory)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && FileKind::detect(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        warn!("No importable files found in {}", directory.display());
    }
    Ok(files)
}

fn is_pattern(path: &Path) -> bool {
    path.to_string_lossy()
        .contains(|c| matches!(c, '*' | '?' | '['))
}

fn expand_pattern(pattern: &Path) -> Result<Vec<PathBuf>> {
    let text = pattern.to_string_lossy();
    let paths = glob::glob(&text).map_err(|e| {
        Error::invalid_argument(format!("Invalid file pattern '{}': {}", text, e))
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let message = format!("Failed to expand pattern at {}", e.path().display());
            Error::io(message, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        warn!("Pattern '{}' matched no files", text);
    }
    Ok(files)
}
