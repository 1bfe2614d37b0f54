//! Logging utilities
//!
//! Subscriber setup shared by the binary and tests

use crate::config::settings::LoggingConfig;
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize logging system
///
/// `RUST_LOG` directives win over the configured level when both are present.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid log filter")?;

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}
