//! Tracing setup for the binary.
//!
//! The terminal belongs to the TUI, so log lines go to a file.

use crate::config::TuiConfig;
use crate::error::TuiError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber: `RUST_LOG` if set, else `log_filter`.
pub fn init_logging(config: &TuiConfig) -> Result<(), TuiError> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| TuiError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))?;

    tracing::info!(
        log_path = %config.log_path.display(),
        filter = %config.log_filter,
        "Logging initialized"
    );
    Ok(())
}
