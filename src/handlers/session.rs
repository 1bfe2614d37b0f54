//! Session handlers
//!
//! Per-visitor dashboards addressed by session id

use crate::handlers::impact::parse_body;
use crate::handlers::AppState;
use crate::models::{
    ImpactResult, OffsetEstimate, PledgeResponse, SavingsQuery, SessionResponse, TrainingQuery,
    UsageQuery,
};
use crate::services::dashboard::{DashboardState, Session};
use crate::services::energy::ModelError;
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn parse_session_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid session id: {}", raw)))
}

fn session_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("session {}", id))
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.id.to_string(),
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
            state: session.state,
        }
    }
}

/// Run a state entry point against a session and surface model errors
async fn apply<T, F>(state: &AppState, raw_id: &str, f: F) -> AppResult<T>
where
    F: FnOnce(&mut DashboardState) -> Result<T, ModelError>,
{
    let id = parse_session_id(raw_id)?;
    let (_, output) = state
        .sessions
        .update(&id, f)
        .await
        .ok_or_else(|| session_not_found(&id))?;
    Ok(output?)
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session.into()))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<SessionResponse>> {
    let id = parse_session_id(&raw_id)?;
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| session_not_found(&id))?;
    Ok(Json(session.into()))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_session_id(&raw_id)?;
    if !state.sessions.remove(&id).await {
        return Err(session_not_found(&id));
    }
    info!("Deleted session {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sessions/:id/usage
pub async fn record_usage(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UsageQuery>, JsonRejection>,
) -> AppResult<Json<ImpactResult>> {
    let query = parse_body(payload)?;
    let result = apply(&state, &raw_id, |dashboard| dashboard.record_usage(query)).await?;
    Ok(Json(result))
}

/// POST /api/sessions/:id/training
pub async fn record_training(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TrainingQuery>, JsonRejection>,
) -> AppResult<Json<ImpactResult>> {
    let query = parse_body(payload)?;
    let result = apply(&state, &raw_id, |dashboard| dashboard.record_training(query)).await?;
    Ok(Json(result))
}

/// POST /api/sessions/:id/savings
pub async fn record_savings(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<SavingsQuery>, JsonRejection>,
) -> AppResult<Json<ImpactResult>> {
    let query = parse_body(payload)?;
    let result = apply(&state, &raw_id, |dashboard| dashboard.record_savings(query)).await?;
    Ok(Json(result))
}

/// POST /api/sessions/:id/pledge
pub async fn pledge(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<PledgeResponse>> {
    let message = apply(&state, &raw_id, |dashboard| Ok(dashboard.pledge())).await?;
    Ok(Json(PledgeResponse {
        pledged: true,
        message: message.to_string(),
    }))
}

/// POST /api/sessions/:id/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<SessionResponse>> {
    let id = parse_session_id(&raw_id)?;
    let (session, _) = state
        .sessions
        .update(&id, DashboardState::reset)
        .await
        .ok_or_else(|| session_not_found(&id))?;
    Ok(Json(session.into()))
}

/// GET /api/sessions/:id/offset
pub async fn offset(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<OffsetEstimate>> {
    let id = parse_session_id(&raw_id)?;
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| session_not_found(&id))?;
    Ok(Json(session.state.offset()?))
}
