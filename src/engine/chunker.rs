use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{BATCH_ID_FIELD, GENERATED_AT_FIELD, Record};

/// Column-projected slice of the consolidated records
pub type Chunk = Vec<Record>;

/// Batch identifier and generation time shared by every record of one chunking run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStamp {
    pub batch_id: String,
    pub generated_at: DateTime<Utc>,
}

impl BatchStamp {
    /// Fresh random batch id stamped with the current time
    pub fn new() -> Self {
        Self {
            batch_id: Uuid::new_v4().hyphenated().to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn with_values(batch_id: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            batch_id: batch_id.into(),
            generated_at,
        }
    }

    /// RFC 3339 rendering used in the stamped field
    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Default for BatchStamp {
    fn default() -> Self {
        Self::new()
    }
}

/// Split records into `chunk_size` groups projected onto `selected_columns`.
///
/// Returns an empty list when there are no records or `chunk_size` is zero.
/// One [`BatchStamp`] is generated per call and shared by every output record.
pub fn chunk(records: &[Record], chunk_size: usize, selected_columns: &[String]) -> Vec<Chunk> {
    if records.is_empty() || chunk_size == 0 {
        return Vec::new();
    }
    chunk_with_stamp(records, chunk_size, selected_columns, &BatchStamp::new())
}

/// Same as [`chunk`] with a caller-supplied stamp
pub fn chunk_with_stamp(
    records: &[Record],
    chunk_size: usize,
    selected_columns: &[String],
    stamp: &BatchStamp,
) -> Vec<Chunk> {
    if records.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let timestamp = stamp.timestamp();
    let chunks: Vec<Chunk> = records
        .chunks(chunk_size)
        .map(|slice| {
            slice
                .iter()
                .map(|record| project(record, selected_columns, &stamp.batch_id, &timestamp))
                .collect()
        })
        .collect();

    debug!(
        records = records.len(),
        chunk_size,
        chunks = chunks.len(),
        batch_id = %stamp.batch_id,
        "Generated chunks"
    );

    chunks
}

/// Keep only selected columns present on the record, then add the stamp fields
fn project(record: &Record, selected_columns: &[String], batch_id: &str, timestamp: &str) -> Record {
    let mut projected = Record::with_capacity(selected_columns.len() + 2);
    for column in selected_columns {
        if let Some(value) = record.get(column) {
            projected.insert(column.clone(), value.clone());
        }
    }
    projected.insert(BATCH_ID_FIELD.to_string(), batch_id.to_string());
    projected.insert(GENERATED_AT_FIELD.to_string(), timestamp.to_string());
    projected
}
