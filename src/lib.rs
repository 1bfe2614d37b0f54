//! AI Power Meter Library
//!
//! Estimates the energy use and CO2 emissions of generative AI prompts and
//! training runs, and serves them as an HTML dashboard and JSON API

pub mod config;
pub mod content;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{build_router, create_router, AppState};
pub use models::{ImpactResult, OffsetEstimate};
pub use services::{energy, AnimationClient, DashboardState, SessionStore};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
