use thiserror::Error;

/// Domain-level errors for source labels and record shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Source label must not be empty")]
    EmptySourceLabel,

    #[error("Source labels must differ: {0}")]
    DuplicateSourceLabel(String),
}
