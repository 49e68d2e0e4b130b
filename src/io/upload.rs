use std::path::Path;

use futures::io::AsyncRead;
use tracing::info;

use super::csv_reader::{CsvRecordStream, CsvTable};
use super::error::IoError;

/// Reject paths that do not carry a `.csv` extension
pub fn ensure_csv_extension(path: &Path) -> Result<(), IoError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(())
    } else {
        Err(IoError::NotCsv(path.display().to_string()))
    }
}

/// Check an uploaded table: usable header, at least one row, every required column present
pub fn validate_upload(file: &str, table: &CsvTable, required: &[String]) -> Result<(), IoError> {
    if table.headers.iter().all(|header| header.is_empty()) {
        return Err(IoError::EmptyHeader(file.to_string()));
    }

    if table.rows.is_empty() {
        return Err(IoError::NoDataRows(file.to_string()));
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|column| !table.headers.contains(column))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(IoError::MissingColumns {
            file: file.to_string(),
            columns: missing,
        });
    }

    Ok(())
}

/// Read and validate an upload from an async reader
pub async fn load_upload_from_reader<R>(
    file: &str,
    reader: R,
    required: &[String],
) -> Result<CsvTable, IoError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let table = CsvRecordStream::new(reader).await?.into_table().await?;
    validate_upload(file, &table, required)?;
    info!(file, rows = table.rows.len(), "CSV loaded and validated");
    Ok(table)
}

/// Read and validate an upload from disk
pub async fn load_upload(path: impl AsRef<Path>, required: &[String]) -> Result<CsvTable, IoError> {
    let path = path.as_ref();
    ensure_csv_extension(path)?;

    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let table = CsvRecordStream::from_file(path).await?.into_table().await?;
    validate_upload(&file, &table, required)?;
    info!(file = %file, rows = table.rows.len(), "CSV loaded and validated");
    Ok(table)
}
