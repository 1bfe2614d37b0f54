//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod impact;
pub mod page;
pub mod session;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{AnimationClient, SessionStore};
use anyhow::Result;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub animation: AnimationClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(settings: Settings, animation: AnimationClient) -> Self {
        let sessions = SessionStore::new(settings.session_ttl(), settings.session.max_sessions);
        Self {
            settings,
            animation,
            sessions,
        }
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let animation = AnimationClient::from_settings(&settings)?;
        Ok(Self::new(settings, animation))
    }
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let state = AppState::from_settings(settings)?;
    Ok(build_router(state))
}

/// Build the router around an already assembled state
pub fn build_router(state: AppState) -> Router {
    let app_state = Arc::new(state);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(
            app_state.settings.request.max_request_size,
        ));

    let router = Router::new()
        .route("/", get(page::dashboard))
        .route("/api/content", get(page::content))
        .route("/api/animation", get(page::animation))
        .route("/api/impact/usage", post(impact::usage))
        .route("/api/impact/training", post(impact::training))
        .route("/api/impact/savings", post(impact::savings))
        .route("/api/impact/offset", post(impact::offset))
        .route("/api/sessions", post(session::create_session))
        .route(
            "/api/sessions/:id",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/api/sessions/:id/usage", post(session::record_usage))
        .route("/api/sessions/:id/training", post(session::record_training))
        .route("/api/sessions/:id/savings", post(session::record_savings))
        .route("/api/sessions/:id/pledge", post(session::pledge))
        .route("/api/sessions/:id/reset", post(session::reset))
        .route("/api/sessions/:id/offset", get(session::offset))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(app_state.clone())
        .layer(middleware_stack);

    match cors_layer(&app_state.settings) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(settings: &Settings) -> Option<CorsLayer> {
    if !settings.security.cors_enabled {
        return None;
    }

    let origins = &settings.security.allowed_origins;
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
