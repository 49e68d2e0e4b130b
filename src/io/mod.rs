pub mod csv_reader;
pub mod csv_writer;
pub mod error;
pub mod export;
pub mod upload;

// Re-export commonly used types
pub use csv_reader::{CsvRecordStream, CsvTable};
pub use csv_writer::to_csv;
pub use error::IoError;
pub use export::{
    CONSOLIDATED_FILE_NAME, DirectorySink, ExportSink, MemorySink, UTF8_BOM, chunk_file_name,
    export_chunk, export_consolidated,
};
pub use upload::{ensure_csv_extension, load_upload, load_upload_from_reader, validate_upload};
