use clap::Parser;
use lead_refinery::prelude::*;

#[tokio::main]
async fn main() {
    let args = RefineryArgs::parse();

    let code = CliApp::new("refinery")
        .with_tracing()
        .run(|| async move {
            let out_dir = args.out_dir.clone();
            let summary = run_refinery(args).await?;

            println!(
                "{} records consolidated ({} duplicates removed), {} chunks of up to {}, {} files written to {}",
                summary.report.consolidated,
                summary.report.duplicates_removed(),
                summary.chunks,
                summary.chunk_size,
                summary.files_written,
                out_dir.display()
            );
            Ok::<(), AppError>(())
        })
        .await;
    std::process::exit(code);
}
