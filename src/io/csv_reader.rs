use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::io::AsyncRead;
use futures::{Stream, StreamExt, TryStreamExt};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::error::IoError;
use crate::domain::Record;

/// Header row plus every data row of a CSV input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

/// Async stream of header-keyed records from CSV input
pub struct CsvRecordStream {
    headers: Arc<Vec<String>>,
    inner: Pin<Box<dyn Stream<Item = Result<Record, IoError>> + Send>>,
}

impl CsvRecordStream {
    /// Create a record stream from an async reader.
    ///
    /// The header row is read eagerly. Header names are trimmed, values are
    /// kept verbatim. Short rows omit the missing columns and cells beyond
    /// the header width are dropped.
    pub async fn new<R>(reader: R) -> Result<Self, IoError>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let mut csv_reader = AsyncReaderBuilder::new()
            .trim(csv_async::Trim::Headers)
            .flexible(true)
            .create_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .await?
            .iter()
            .map(str::to_string)
            .collect();
        let headers = Arc::new(headers);

        let row_headers = Arc::clone(&headers);
        let stream = csv_reader.into_records().map(move |result| {
            result
                .map(|row| to_record(&row_headers, &row))
                .map_err(IoError::from)
        });

        Ok(Self {
            headers,
            inner: Box::pin(stream),
        })
    }

    /// Create a record stream from a file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let stream = CsvRecordStream::from_file("spider_leads.csv").await?;
    /// ```
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Self::new(file.compat()).await
    }

    /// Header row as read from the input
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Drain the stream into a [`CsvTable`]
    pub async fn into_table(self) -> Result<CsvTable, IoError> {
        let headers = self.headers.as_ref().clone();
        let rows: Vec<Record> = self.try_collect().await?;
        Ok(CsvTable { headers, rows })
    }
}

impl Stream for CsvRecordStream {
    type Item = Result<Record, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

fn to_record(headers: &[String], row: &StringRecord) -> Record {
    headers
        .iter()
        .zip(row.iter())
        .map(|(header, value)| (header.clone(), value.to_string()))
        .collect()
}
