//! Middleware module
//!
//! Request logging layers

pub mod logging;
