use tracing::info;

use super::args::RefineryArgs;
use super::error::AppError;
use super::session::RefinerySession;
use crate::config::{EtlParams, load_params};
use crate::domain::SourceSide;
use crate::engine::ConsolidationReport;
use crate::io::{DirectorySink, load_upload};

/// What one command-line run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub report: ConsolidationReport,
    pub chunk_size: usize,
    pub chunks: usize,
    pub files_written: usize,
}

/// Load both uploads, consolidate, chunk and export into `args.out_dir`
pub async fn run_refinery(args: RefineryArgs) -> Result<RunSummary, AppError> {
    let params = match &args.config {
        Some(path) => load_params(path)?,
        None => EtlParams::default(),
    };
    let mut session = RefinerySession::new(params)?;

    for side in SourceSide::ALL {
        let required = session.params().upload_validation.required_fields(side).to_vec();
        let table = load_upload(args.source_path(side), &required).await?;
        session.load_source(side, table.rows);
    }

    let report = session.consolidate()?;

    if let Some(requested) = args.chunk_size {
        session.set_chunk_size(requested);
    }
    if let Some(columns) = args.selected_columns() {
        session.select_columns(columns);
    }
    let chunks = session.generate_chunks()?.len();

    let mut sink = DirectorySink::new(&args.out_dir);
    let files_written = session.export_all(&mut sink).await?;

    info!(
        out_dir = %args.out_dir.display(),
        files_written,
        "Refinery run complete"
    );

    Ok(RunSummary {
        report,
        chunk_size: session.chunk_size(),
        chunks,
        files_written,
    })
}
