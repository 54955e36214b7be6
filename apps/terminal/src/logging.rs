//! Tracing setup.
//!
//! The terminal UI owns stdout, so log lines go to a file or nowhere.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Install the global subscriber when a log file is configured.
///
/// Returns whether logging was enabled.
pub fn init(config: &Config) -> anyhow::Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(true)
}
