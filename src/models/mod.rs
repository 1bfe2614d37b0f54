//! Data models module
//!
//! Defines the impact figures and the API request/response structures

use serde::{Deserialize, Serialize};

pub mod impact;

pub use impact::*;

use crate::content::Content;
use crate::services::dashboard::DashboardState;

/// Snapshot of one visitor's dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub state: DashboardState,
}

/// Acknowledgement returned when a visitor pledges support
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeResponse {
    pub pledged: bool,
    pub message: String,
}

/// Static page content
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    #[serde(flatten)]
    pub content: &'static Content,
    pub version: String,
}
