//! `tracing` subscriber setup for the binaries.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "DOCDESK_LOG";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI runs log to stderr; quiet unless `DOCDESK_LOG` asks for more.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}

/// The terminal console owns the screen, so it logs to a file instead.
pub fn init_file(log_path: &Path) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .try_init();
    Ok(())
}
