use super::activity::{ActivityLog, LogEntry};
use super::error::AppError;
use crate::config::{ChunkSize, EtlParams};
use crate::domain::{Record, SourceSide};
use crate::engine::{
    Chunk, Consolidation, ConsolidationReport, Consolidator, EngineError, chunk,
};
use crate::io::{ExportSink, export_chunk, export_consolidated, to_csv};

/// Stateful consolidate-then-chunk workflow over two uploads.
///
/// Replacing or clearing a source discards consolidated data and chunks;
/// consolidating again discards chunks.
#[derive(Debug)]
pub struct RefinerySession {
    params: EtlParams,
    consolidator: Consolidator,
    source_a: Option<Vec<Record>>,
    source_b: Option<Vec<Record>>,
    consolidation: Option<Consolidation>,
    chunk_size: usize,
    selected_columns: Vec<String>,
    chunks: Option<Vec<Chunk>>,
    log: ActivityLog,
}

impl RefinerySession {
    pub fn new(params: EtlParams) -> Result<Self, AppError> {
        params.validate()?;
        let consolidator = params.consolidator()?;
        let chunk_size = params.chunking.default_size;

        Ok(Self {
            params,
            consolidator,
            source_a: None,
            source_b: None,
            consolidation: None,
            chunk_size,
            selected_columns: Vec::new(),
            chunks: None,
            log: ActivityLog::new(),
        })
    }

    pub fn params(&self) -> &EtlParams {
        &self.params
    }

    /// Replace the rows of one source
    pub fn load_source(&mut self, side: SourceSide, rows: Vec<Record>) {
        let label = self.params.source_label(side).to_string();
        self.log
            .success(format!("{label} source loaded: {} records", rows.len()));
        *self.source_slot(side) = Some(rows);
        self.discard_consolidation(&format!("{label} source changed"));
    }

    /// Remove the rows of one source
    pub fn clear_source(&mut self, side: SourceSide) {
        if self.source_slot(side).take().is_some() {
            let label = self.params.source_label(side).to_string();
            self.log.info(format!("{label} source removed"));
            self.discard_consolidation(&format!("{label} source removed"));
        }
    }

    pub fn source_rows(&self, side: SourceSide) -> Option<&[Record]> {
        match side {
            SourceSide::A => self.source_a.as_deref(),
            SourceSide::B => self.source_b.as_deref(),
        }
    }

    /// Merge both sources; rejected when either is missing or empty
    pub fn consolidate(&mut self) -> Result<ConsolidationReport, AppError> {
        let outcome = match (self.present_rows(SourceSide::A), self.present_rows(SourceSide::B)) {
            (Ok(a), Ok(b)) => Ok(self.consolidator.run(a, b)),
            (Err(err), _) | (_, Err(err)) => Err(err),
        };

        let consolidation = match outcome {
            Ok(consolidation) => consolidation,
            Err(err) => {
                self.log.error(format!("Consolidation rejected: {err}"));
                return Err(err.into());
            }
        };

        let report = consolidation.report;
        self.consolidation = Some(consolidation);
        self.chunks = None;
        self.select_all_columns();
        self.log.success(format!(
            "Consolidated {} records ({} duplicates removed)",
            report.consolidated,
            report.duplicates_removed()
        ));
        Ok(report)
    }

    pub fn consolidated(&self) -> Option<&[Record]> {
        self.consolidation
            .as_ref()
            .map(|consolidation| consolidation.records.as_slice())
    }

    pub fn report(&self) -> Option<ConsolidationReport> {
        self.consolidation
            .as_ref()
            .map(|consolidation| consolidation.report)
    }

    /// Columns of the first consolidated record
    pub fn available_columns(&self) -> Vec<String> {
        self.consolidated().map(column_names).unwrap_or_default()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Set the chunk size, clamped to the configured bounds
    pub fn set_chunk_size(&mut self, requested: i64) -> ChunkSize {
        let decision = self.params.chunking.clamp(requested);
        self.chunk_size = decision.get();
        match decision {
            ChunkSize::Accepted(size) => self.log.info(format!("Chunk size set to {size}")),
            ChunkSize::RaisedToMin(size) => self.log.error(format!(
                "Chunk size {requested} below minimum, set to {size}"
            )),
            ChunkSize::LoweredToMax(size) => self.log.error(format!(
                "Chunk size {requested} above maximum, set to {size}"
            )),
        }
        decision
    }

    pub fn selected_columns(&self) -> &[String] {
        &self.selected_columns
    }

    pub fn select_columns(&mut self, columns: Vec<String>) {
        self.selected_columns = columns;
    }

    pub fn select_all_columns(&mut self) {
        self.selected_columns = self.available_columns();
    }

    pub fn deselect_all_columns(&mut self) {
        self.selected_columns.clear();
    }

    /// Split the consolidated records into chunks over the selected columns
    pub fn generate_chunks(&mut self) -> Result<&[Chunk], AppError> {
        if let Err(err) = self.check_chunk_inputs() {
            self.log.error(format!("Chunk generation rejected: {err}"));
            return Err(err.into());
        }

        let records = self.consolidated().unwrap_or_default();
        let chunks = chunk(records, self.chunk_size, &self.selected_columns);
        self.log.success(format!(
            "Generated {} chunks of up to {} records",
            chunks.len(),
            self.chunk_size
        ));
        let chunks = self.chunks.insert(chunks);
        Ok(chunks.as_slice())
    }

    pub fn chunks(&self) -> Option<&[Chunk]> {
        self.chunks.as_deref()
    }

    /// CSV text for the whole consolidated set
    pub fn consolidated_csv(&self) -> Result<String, AppError> {
        let records = self
            .consolidated()
            .ok_or_else(|| EngineError::MissingInput("no consolidated data".to_string()))?;
        Ok(to_csv(records, None)?)
    }

    /// CSV text for the chunk at 0-based `index`
    pub fn chunk_csv(&self, index: usize) -> Result<String, AppError> {
        let chunk = self.chunk_at(index)?;
        let header: Vec<String> = chunk
            .first()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();
        Ok(to_csv(chunk, Some(header.as_slice()))?)
    }

    /// Write the consolidated file and every chunk file; returns the number of files
    pub async fn export_all<S>(&mut self, sink: &mut S) -> Result<usize, AppError>
    where
        S: ExportSink + ?Sized,
    {
        let records = self
            .consolidated()
            .ok_or_else(|| EngineError::MissingInput("no consolidated data".to_string()))?;
        export_consolidated(sink, records).await?;
        let mut written = 1;

        for (index, chunk) in self.chunks().unwrap_or_default().iter().enumerate() {
            export_chunk(sink, index, chunk).await?;
            written += 1;
        }

        self.log.info(format!("Exported {written} files"));
        Ok(written)
    }

    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    fn chunk_at(&self, index: usize) -> Result<&Chunk, EngineError> {
        let chunks = self.chunks().unwrap_or_default();
        chunks.get(index).ok_or(EngineError::ChunkOutOfRange {
            index: index + 1,
            count: chunks.len(),
        })
    }

    fn check_chunk_inputs(&self) -> Result<(), EngineError> {
        if self.consolidated().is_none() {
            return Err(EngineError::MissingInput(
                "consolidate the sources before chunking".to_string(),
            ));
        }
        if self.selected_columns.is_empty() {
            return Err(EngineError::NoColumnsSelected);
        }
        Ok(())
    }

    fn present_rows(&self, side: SourceSide) -> Result<&[Record], EngineError> {
        let label = self.params.source_label(side);
        match self.source_rows(side) {
            None => Err(EngineError::MissingInput(format!(
                "{label} source has not been loaded"
            ))),
            Some([]) => Err(EngineError::MissingInput(format!(
                "{label} source has no records"
            ))),
            Some(rows) => Ok(rows),
        }
    }

    fn source_slot(&mut self, side: SourceSide) -> &mut Option<Vec<Record>> {
        match side {
            SourceSide::A => &mut self.source_a,
            SourceSide::B => &mut self.source_b,
        }
    }

    fn discard_consolidation(&mut self, reason: &str) {
        if self.consolidation.take().is_some() {
            self.chunks = None;
            self.log
                .info(format!("{reason}: consolidated data and chunks reset"));
        }
    }
}

fn column_names(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default()
}
