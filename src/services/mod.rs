//! Service layer module
//!
//! Contains the energy model, visitor dashboards and the animation fetcher

pub mod animation;
pub mod dashboard;
pub mod energy;

pub use animation::{AnimationClient, AnimationSource, HttpAnimationSource};
pub use dashboard::{DashboardState, Session, SessionStore};
