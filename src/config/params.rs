use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ConfigError;
use crate::domain::{ColumnMapping, DomainError, SourceSide, SourceTag};
use crate::engine::Consolidator;

/// Labels for the two uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceLabels {
    #[serde(default = "default_label_a")]
    pub a: String,
    #[serde(default = "default_label_b")]
    pub b: String,
}

impl Default for SourceLabels {
    fn default() -> Self {
        Self {
            a: default_label_a(),
            b: default_label_b(),
        }
    }
}

/// Columns each upload must carry to be accepted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadValidation {
    #[serde(default)]
    pub a_required_fields: Vec<String>,
    #[serde(default)]
    pub b_required_fields: Vec<String>,
}

impl UploadValidation {
    pub fn required_fields(&self, side: SourceSide) -> &[String] {
        match side {
            SourceSide::A => &self.a_required_fields,
            SourceSide::B => &self.b_required_fields,
        }
    }
}

/// Chunk size default and the range requests are clamped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkingParams {
    #[serde(default = "default_chunk_size")]
    pub default_size: usize,
    #[serde(default = "default_min_chunk_size")]
    pub min_size: usize,
    #[serde(default = "default_max_chunk_size")]
    pub max_size: usize,
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self {
            default_size: default_chunk_size(),
            min_size: default_min_chunk_size(),
            max_size: default_max_chunk_size(),
        }
    }
}

/// Outcome of clamping a requested chunk size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSize {
    Accepted(usize),
    RaisedToMin(usize),
    LoweredToMax(usize),
}

impl ChunkSize {
    pub fn get(self) -> usize {
        match self {
            ChunkSize::Accepted(size)
            | ChunkSize::RaisedToMin(size)
            | ChunkSize::LoweredToMax(size) => size,
        }
    }

    pub fn was_adjusted(self) -> bool {
        !matches!(self, ChunkSize::Accepted(_))
    }
}

impl ChunkingParams {
    /// Clamp a requested size into `[min_size, max_size]`
    pub fn clamp(&self, requested: i64) -> ChunkSize {
        match usize::try_from(requested) {
            Ok(size) if size < self.min_size => ChunkSize::RaisedToMin(self.min_size),
            Ok(size) if size > self.max_size => ChunkSize::LoweredToMax(self.max_size),
            Ok(size) => ChunkSize::Accepted(size),
            Err(_) => ChunkSize::RaisedToMin(self.min_size),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.min_size >= 1
            && self.min_size <= self.default_size
            && self.default_size <= self.max_size;
        if !ordered {
            return Err(ConfigError::InvalidChunkBounds {
                min: self.min_size,
                default: self.default_size,
                max: self.max_size,
            });
        }
        Ok(())
    }
}

/// ETL parameters: source labels, dedupe rules, column mapping, upload checks, chunk bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EtlParams {
    #[serde(default)]
    pub sources: SourceLabels,
    #[serde(default = "default_deduplication_keys")]
    pub deduplication_keys: Vec<String>,
    #[serde(default = "default_label_b")]
    pub conflict_resolution_priority_source: String,
    #[serde(default)]
    pub column_mapping: ColumnMapping,
    #[serde(default)]
    pub upload_validation: UploadValidation,
    #[serde(default)]
    pub chunking: ChunkingParams,
}

impl Default for EtlParams {
    fn default() -> Self {
        Self {
            sources: SourceLabels::default(),
            deduplication_keys: default_deduplication_keys(),
            conflict_resolution_priority_source: default_label_b(),
            column_mapping: ColumnMapping::default(),
            upload_validation: UploadValidation::default(),
            chunking: ChunkingParams::default(),
        }
    }
}

impl EtlParams {
    /// Parse and validate parameters from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: EtlParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Check label and chunk-bound invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunking.validate()?;
        let (a, b) = self.source_tags()?;
        if a == b {
            return Err(DomainError::DuplicateSourceLabel(a.to_string()).into());
        }
        SourceTag::new(self.conflict_resolution_priority_source.as_str())?;
        Ok(())
    }

    pub fn source_tags(&self) -> Result<(SourceTag, SourceTag), ConfigError> {
        Ok((
            SourceTag::new(self.sources.a.as_str())?,
            SourceTag::new(self.sources.b.as_str())?,
        ))
    }

    pub fn source_label(&self, side: SourceSide) -> &str {
        match side {
            SourceSide::A => &self.sources.a,
            SourceSide::B => &self.sources.b,
        }
    }

    /// Build a [`Consolidator`] from these parameters
    pub fn consolidator(&self) -> Result<Consolidator, ConfigError> {
        let (a, b) = self.source_tags()?;
        let priority = SourceTag::new(self.conflict_resolution_priority_source.as_str())?;
        if priority != a && priority != b {
            warn!(
                priority = %priority,
                "Priority source matches neither source label; later records win every conflict"
            );
        }

        Ok(Consolidator::new(
            a,
            b,
            self.deduplication_keys.clone(),
            priority,
            self.column_mapping.clone(),
        )?)
    }
}

/// Load parameters from a JSON file
pub fn load_params(path: impl AsRef<Path>) -> Result<EtlParams, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    EtlParams::from_json_str(&json)
}

fn default_label_a() -> String {
    "SourceA".to_string()
}

fn default_label_b() -> String {
    "SourceB".to_string()
}

fn default_deduplication_keys() -> Vec<String> {
    vec!["name".to_string()]
}

fn default_chunk_size() -> usize {
    50
}

fn default_min_chunk_size() -> usize {
    10
}

fn default_max_chunk_size() -> usize {
    500
}
