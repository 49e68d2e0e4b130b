use thiserror::Error;

/// Engine-level errors: rejected operations, never malformed data
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("No columns selected for chunking")]
    NoColumnsSelected,

    #[error("Chunk {index} does not exist ({count} generated)")]
    ChunkOutOfRange { index: usize, count: usize },
}
