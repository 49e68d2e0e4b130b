use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::info;

use super::csv_writer::to_csv;
use super::error::IoError;
use crate::domain::Record;

/// File name of the full consolidated export
pub const CONSOLIDATED_FILE_NAME: &str = "consolidated.csv";

/// Byte order mark prefixed to exports so spreadsheet tools pick UTF-8
pub const UTF8_BOM: &str = "\u{FEFF}";

/// File name for the chunk at 0-based `index` (`chunk_1.csv` for index 0)
pub fn chunk_file_name(index: usize) -> String {
    format!("chunk_{}.csv", index + 1)
}

/// Destination for exported CSV files
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Store `contents` under `name`, replacing any previous file of that name
    async fn write_file(&mut self, name: &str, contents: &str) -> Result<(), IoError>;
}

/// Writes exports into a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ExportSink for DirectorySink {
    async fn write_file(&mut self, name: &str, contents: &str) -> Result<(), IoError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(name);
        tokio::fs::write(&path, contents.as_bytes()).await?;
        info!(path = %path.display(), bytes = contents.len(), "Export written");
        Ok(())
    }
}

/// Keeps exports in memory, in write order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn write_file(&mut self, name: &str, contents: &str) -> Result<(), IoError> {
        self.files.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// Write the consolidated records as `consolidated.csv`
pub async fn export_consolidated<S>(sink: &mut S, records: &[Record]) -> Result<(), IoError>
where
    S: ExportSink + ?Sized,
{
    let csv = to_csv(records, None)?;
    sink.write_file(CONSOLIDATED_FILE_NAME, &with_bom(&csv))
        .await
}

/// Write one chunk as `chunk_<n>.csv`, using its first record's keys as the header
pub async fn export_chunk<S>(sink: &mut S, index: usize, chunk: &[Record]) -> Result<(), IoError>
where
    S: ExportSink + ?Sized,
{
    let Some(first) = chunk.first() else {
        return Err(IoError::EmptyChunk(index + 1));
    };
    let header: Vec<String> = first.keys().cloned().collect();
    let csv = to_csv(chunk, Some(header.as_slice()))?;
    sink.write_file(&chunk_file_name(index), &with_bom(&csv))
        .await
}

fn with_bom(csv: &str) -> String {
    let mut contents = String::with_capacity(UTF8_BOM.len() + csv.len());
    contents.push_str(UTF8_BOM);
    contents.push_str(csv);
    contents
}
