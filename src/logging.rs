use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::paths::log_file_path;

const DEFAULT_FILTER: &str = "info";

/// Routes `tracing` output to a log file. The terminal belongs to the page, so
/// nothing is ever written to stdout or stderr from here.
///
/// The returned guard flushes the background writer when dropped and must be
/// held for the lifetime of the program.
pub fn init(override_path: Option<&Path>) -> Result<WorkerGuard> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => log_file_path()?,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))?;

    tracing::debug!(path = %path.display(), "logging initialised");
    Ok(guard)
}
