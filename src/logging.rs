use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::DATA_FOLDER;

lazy_static::lazy_static! {
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Where the log goes when no path is given: `FILTERBOX_DATA` if set, else the working directory
pub fn default_log_path() -> Result<PathBuf> {
    let dir = match DATA_FOLDER.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    Ok(dir.join(LOG_FILE.as_str()))
}

/// Initialize logging with custom path and/or level
pub fn init_with(custom_log_path: Option<PathBuf>, level: Option<tracing::Level>) -> Result<()> {
    let log_path = match custom_log_path {
        Some(path) => path,
        None => default_log_path()?,
    };
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    // CLI level overrides RUST_LOG; WARN otherwise
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.unwrap_or(tracing::Level::WARN).into())
        .from_env_lossy();

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(log_file))
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    tracing::debug!("Logging to {}", log_path.display());
    Ok(())
}
