pub mod activity;
pub mod args;
pub mod cli;
pub mod error;
pub mod run;
pub mod session;

// Re-export commonly used types
pub use activity::{ActivityLog, LogEntry, LogLevel};
pub use args::{DEFAULT_OUT_DIR, RefineryArgs};
pub use cli::CliApp;
pub use error::AppError;
pub use run::{RunSummary, run_refinery};
pub use session::RefinerySession;
