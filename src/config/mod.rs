pub mod error;
pub mod params;

// Re-export commonly used types
pub use error::ConfigError;
pub use params::{
    ChunkSize, ChunkingParams, EtlParams, SourceLabels, UploadValidation, load_params,
};
