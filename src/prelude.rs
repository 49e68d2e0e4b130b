//! Prelude module for convenient imports
//!
//! Import everything you need with: `use lead_refinery::prelude::*;`

// Domain types
pub use crate::domain::{
    BATCH_ID_FIELD, ColumnMapping, DomainError, GENERATED_AT_FIELD, ID_FIELD, Record,
    SOURCE_FIELD, SourceSide, SourceTag, record_from_pairs,
};

// Engine types
pub use crate::engine::{
    BatchStamp, Chunk, Consolidation, ConsolidationReport, Consolidator, EngineError,
    SourceRows, chunk, chunk_with_stamp, consolidate,
};

// IO types
pub use crate::io::{
    CONSOLIDATED_FILE_NAME, CsvRecordStream, CsvTable, DirectorySink, ExportSink, IoError,
    MemorySink, chunk_file_name, export_chunk, export_consolidated, load_upload,
    load_upload_from_reader, to_csv,
};

// Config types
pub use crate::config::{ChunkSize, ConfigError, EtlParams, load_params};

// App types
pub use crate::app::{
    AppError, CliApp, LogEntry, LogLevel, RefineryArgs, RefinerySession, RunSummary,
    run_refinery,
};
