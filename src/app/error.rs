use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::DomainError;
use crate::engine::EngineError;
use crate::io::IoError;

/// Errors surfaced by the session and the run pipeline
#[derive(Error, Debug)]
pub enum AppError {
    #[error("CSV IO error: {0}")]
    CsvIo(#[from] IoError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
