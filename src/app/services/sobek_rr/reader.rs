//! Core Sobek RR reader implementation
//!
//! Scans a file for the blocks of one record kind and builds a record per block.
//! A block that cannot be built is logged and counted, and reading continues with
//! the next block.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::records::{
    BoundaryRecord, GreenhouseRecord, InfiltrationRecord, NodeRecord, PavedRecord,
    SeepageRecord, SobekRecord, StorageRecord, UnpavedRecord,
};
use super::stats::{BlockStats, ParseResult};
use crate::app::services::tagged_records::{
    MissingTagPolicy, RecordFields, TagCase, TaggedRecordExtractor,
};
use crate::app::services::text_reader::read_file;
use crate::config::SobekConfig;
use crate::constants::sobek_files;
use crate::{Error, ParseError, Result};

/// Known Sobek RR file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SobekFileKind {
    Nodes,
    Paved,
    Unpaved,
    Storage,
    Boundaries,
    Greenhouses,
    Seepage,
    Infiltration,
}

impl SobekFileKind {
    /// Recognize a Sobek RR file by its name, ignoring case
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let upper = file_name.to_ascii_uppercase();
        let (_, tag) = sobek_files::ALL
            .iter()
            .find(|(name, _)| *name == upper)?;

        match *tag {
            "NODE" => Some(Self::Nodes),
            "PAVE" => Some(Self::Paved),
            "UNPV" => Some(Self::Unpaved),
            "STDF" => Some(Self::Storage),
            "BOUN" => Some(Self::Boundaries),
            "GRNH" => Some(Self::Greenhouses),
            "SEEP" => Some(Self::Seepage),
            "INFC" => Some(Self::Infiltration),
            _ => None,
        }
    }
}

/// Records of one Sobek RR file
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", content = "records")]
pub enum SobekRecords {
    Nodes(Vec<NodeRecord>),
    Paved(Vec<PavedRecord>),
    Unpaved(Vec<UnpavedRecord>),
    Storage(Vec<StorageRecord>),
    Boundaries(Vec<BoundaryRecord>),
    Greenhouses(Vec<GreenhouseRecord>),
    Seepage(Vec<SeepageRecord>),
    Infiltration(Vec<InfiltrationRecord>),
}

impl SobekRecords {
    pub fn len(&self) -> usize {
        match self {
            Self::Nodes(records) => records.len(),
            Self::Paved(records) => records.len(),
            Self::Unpaved(records) => records.len(),
            Self::Storage(records) => records.len(),
            Self::Boundaries(records) => records.len(),
            Self::Greenhouses(records) => records.len(),
            Self::Seepage(records) => records.len(),
            Self::Infiltration(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reader for Sobek rainfall-runoff tagged record files
#[derive(Debug, Clone)]
pub struct SobekRrReader {
    tag_case: TagCase,
    missing_tag_policy: MissingTagPolicy,
}

impl Default for SobekRrReader {
    fn default() -> Self {
        Self::new(&SobekConfig::default())
    }
}

impl SobekRrReader {
    /// Create a reader with the tag case and missing-tag policy of `config`
    pub fn new(config: &SobekConfig) -> Self {
        Self {
            tag_case: config.tag_case,
            missing_tag_policy: config.missing_tag_policy,
        }
    }

    /// Override the missing-tag policy for one file kind
    pub fn with_missing_tag_policy(mut self, policy: MissingTagPolicy) -> Self {
        self.missing_tag_policy = policy;
        self
    }

    /// Read all records of kind `R` from a file
    pub fn read_file<R: SobekRecord>(&self, path: &Path) -> Result<ParseResult<R>> {
        info!("Reading {} records from {}", R::TAG, path.display());
        let content = read_file(path)?;
        self.parse_content(&content, &path.display().to_string())
    }

    /// Parse all records of kind `R` from file content
    pub fn parse_content<R: SobekRecord>(
        &self,
        content: &str,
        source_name: &str,
    ) -> Result<ParseResult<R>> {
        let mut stats = BlockStats::new(R::TAG);
        let mut records: Vec<R> = Vec::new();
        let mut seen_ids = HashSet::new();

        let extractor = TaggedRecordExtractor::new(R::TAG).with_case(self.tag_case);
        for block in extractor.blocks(content) {
            let built = block.and_then(|block| {
                R::from_fields(&RecordFields::new(R::TAG, block.line, block.text))
            });

            match built {
                Ok(record) => {
                    if !seen_ids.insert(record.id().to_string()) {
                        warn!(
                            "Duplicate {} id '{}' in {}",
                            R::TAG,
                            record.id(),
                            source_name
                        );
                    }
                    stats.add_built();
                    records.push(record);
                }
                Err(e) => {
                    warn!("Skipping record in {}: {}", source_name, e);
                    stats.add_skipped(e);
                }
            }
        }

        if stats.blocks == 0 {
            match self.missing_tag_policy {
                MissingTagPolicy::Empty => {
                    debug!("No {} records in {}", R::TAG, source_name);
                }
                MissingTagPolicy::Error => {
                    return Err(Error::parse(
                        source_name,
                        ParseError::MissingTag {
                            tag: R::TAG.to_string(),
                        },
                    ));
                }
            }
        }

        info!(
            "Parsed {} of {} {} records from {}",
            stats.built(),
            stats.blocks,
            R::TAG,
            source_name
        );

        Ok(ParseResult { records, stats })
    }

    /// Read a file whose kind is recognized from its name
    pub fn read_known_file(&self, path: &Path) -> Result<(SobekRecords, BlockStats)> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let kind = SobekFileKind::from_file_name(&file_name).ok_or_else(|| {
            Error::invalid_argument(format!("'{}' is not a known Sobek RR file", file_name))
        })?;

        Ok(match kind {
            SobekFileKind::Nodes => {
                let result = self.read_file::<NodeRecord>(path)?;
                (SobekRecords::Nodes(result.records), result.stats)
            }
            SobekFileKind::Paved => {
                let result = self.read_file::<PavedRecord>(path)?;
                (SobekRecords::Paved(result.records), result.stats)
            }
            SobekFileKind::Unpaved => {
                let result = self.read_file::<UnpavedRecord>(path)?;
                (SobekRecords::Unpaved(result.records), result.stats)
            }
            SobekFileKind::Storage => {
                let result = self.read_file::<StorageRecord>(path)?;
                (SobekRecords::Storage(result.records), result.stats)
            }
            SobekFileKind::Boundaries => {
                let result = self.read_file::<BoundaryRecord>(path)?;
                (SobekRecords::Boundaries(result.records), result.stats)
            }
            SobekFileKind::Greenhouses => {
                let result = self.read_file::<GreenhouseRecord>(path)?;
                (SobekRecords::Greenhouses(result.records), result.stats)
            }
            SobekFileKind::Seepage => {
                let result = self.read_file::<SeepageRecord>(path)?;
                (SobekRecords::Seepage(result.records), result.stats)
            }
            SobekFileKind::Infiltration => {
                let result = self.read_file::<InfiltrationRecord>(path)?;
                (SobekRecords::Infiltration(result.records), result.stats)
            }
        })
    }
}
