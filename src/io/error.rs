use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

/// IO-level errors for CSV reading, upload validation and export
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV parsing error: {0}")]
    CsvAsync(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Not a CSV file: {0}")]
    NotCsv(String),

    #[error("CSV file {0} is empty or has no valid header")]
    EmptyHeader(String),

    #[error("CSV file {0} has a header but no data rows")]
    NoDataRows(String),

    #[error("Missing required columns in {file}: {}", columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    #[error("Chunk {0} is empty and cannot be exported")]
    EmptyChunk(usize),
}
