//! Photo Renamer logging & crash reporting
//!
//! Provides structured logging to a rolling file and a panic hook that leaves a
//! crash report behind.

mod panic_hook;
mod logging;

pub use panic_hook::init_panic_hook;
pub use logging::{init_logging, cleanup_old_logs, LOG_FILE_PREFIX};
pub use tracing_appender::non_blocking::WorkerGuard;

use std::path::PathBuf;
use directories::ProjectDirs;

/// Get the application log directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("org", "PhotoRenamer", "PhotoRenamer")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize all observability features
///
/// The returned guard flushes the file writer when dropped, so the caller
/// keeps it alive until shutdown.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let guard = init_logging()?;
    init_panic_hook();
    Ok(guard)
}
