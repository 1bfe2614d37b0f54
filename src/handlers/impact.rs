//! Impact calculation handlers
//!
//! Stateless JSON endpoints over the energy model

use crate::models::{ImpactResult, OffsetEstimate, OffsetQuery, SavingsQuery, TrainingQuery, UsageQuery};
use crate::services::energy;
use crate::utils::error::{AppError, AppResult};
use axum::{extract::rejection::JsonRejection, Json};
use tracing::debug;

/// Unwrap a JSON body, reporting malformed input as a validation error
pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// POST /api/impact/usage
pub async fn usage(payload: Result<Json<UsageQuery>, JsonRejection>) -> AppResult<Json<ImpactResult>> {
    let query = parse_body(payload)?;
    debug!("Usage impact for {} prompts", query.prompt_count);
    Ok(Json(energy::usage_impact(query.prompt_count)?))
}

/// POST /api/impact/training
pub async fn training(
    payload: Result<Json<TrainingQuery>, JsonRejection>,
) -> AppResult<Json<ImpactResult>> {
    let query = parse_body(payload)?;
    debug!("Training impact for {} models", query.model_count);
    Ok(Json(energy::training_impact(query.model_count)?))
}

/// POST /api/impact/savings
pub async fn savings(
    payload: Result<Json<SavingsQuery>, JsonRejection>,
) -> AppResult<Json<ImpactResult>> {
    let query = parse_body(payload)?;
    debug!("Savings for {} fewer prompts", query.reduced_prompts);
    Ok(Json(energy::savings(query.reduced_prompts)?))
}

/// POST /api/impact/offset
pub async fn offset(
    payload: Result<Json<OffsetQuery>, JsonRejection>,
) -> AppResult<Json<OffsetEstimate>> {
    let query = parse_body(payload)?;
    let trees_per_year = energy::offset_trees(query.total_co2_kg)?;
    Ok(Json(OffsetEstimate {
        trees_per_year,
        total_co2_kg: query.total_co2_kg,
        components: Vec::new(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_usage_handler() {
        let Json(result) = usage(Ok(Json(UsageQuery { prompt_count: 0 }))).await.unwrap();
        assert_eq!(result, ImpactResult::ZERO);
    }

    #[tokio::test]
    async fn test_training_handler_rejects_negative() {
        let err = training(Ok(Json(TrainingQuery { model_count: -1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_offset_handler() {
        let Json(estimate) = offset(Ok(Json(OffsetQuery { total_co2_kg: 22.0 })))
            .await
            .unwrap();
        assert_eq!(estimate.trees_per_year, 1.0);
        assert_eq!(estimate.total_co2_kg, 22.0);
    }
}
