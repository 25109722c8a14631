//! Photo Renamer - name photos after checkable tags and their date
//!
//! Main entry point. The only argument is the folder to start browsing.

mod app;

use anyhow::Result;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    let _log_guard = app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Photo Renamer starting...");

    let start_folder = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = app_core::AppConfig::with_start_folder(start_folder);

    let mut context = app_core::AppContext::new(config)?;

    let stdin = std::io::stdin();
    let result = app::Shell::new(stdin.lock(), std::io::stdout()).run(&mut context);

    // Tabs are saved even when the shell stopped on an I/O error
    if let Err(e) = context.shutdown() {
        tracing::error!("Failed to save tabs: {}", e);
        eprintln!("Failed to save tabs: {}", e);
    }

    result
}
