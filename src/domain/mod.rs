pub mod error;
pub mod mapping;
pub mod record;
pub mod source;

// Re-export commonly used types
pub use error::DomainError;
pub use mapping::ColumnMapping;
pub use record::{
    BATCH_ID_FIELD, GENERATED_AT_FIELD, ID_FIELD, KEY_SEPARATOR, Record, SOURCE_FIELD,
    record_from_pairs,
};
pub use source::{SourceSide, SourceTag};
