//! Utilities module
//!
//! Contains error handling, logging setup and metric formatting

pub mod error;
pub mod format;
pub mod logging;
