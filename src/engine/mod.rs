pub mod chunker;
pub mod consolidator;
pub mod error;

// Re-export commonly used types
pub use chunker::{BatchStamp, Chunk, chunk, chunk_with_stamp};
pub use consolidator::{
    Consolidation, ConsolidationReport, Consolidator, SourceRows, consolidate,
};
pub use error::EngineError;
