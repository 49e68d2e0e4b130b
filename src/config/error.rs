use std::io;
use thiserror::Error;

use crate::domain::DomainError;

/// Errors raised while loading or validating ETL parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid chunk size bounds: min {min}, default {default}, max {max}")]
    InvalidChunkBounds {
        min: usize,
        default: usize,
        max: usize,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
