//! Energy model
//!
//! Linear estimates of the electricity used and CO2 emitted by AI prompts and
//! small training runs, and the number of trees needed to absorb the CO2.
//! Every function is pure and rejects negative input.

use crate::models::ImpactResult;
use thiserror::Error;

/// Electricity consumed by one prompt
pub const ENERGY_PER_PROMPT_KWH: f64 = 0.002;
/// CO2 emitted by one prompt
pub const CO2_PER_PROMPT_KG: f64 = 0.0005;
/// Electricity consumed by training one small model
pub const ENERGY_PER_TRAINING_RUN_KWH: f64 = 2.0;
/// CO2 emitted by training one small model
pub const CO2_PER_TRAINING_RUN_KG: f64 = 0.5;
/// CO2 a single tree absorbs in a year
pub const CO2_ABSORBED_PER_TREE_KG_PER_YEAR: f64 = 22.0;

/// Energy model errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidArgument { field: &'static str, value: String },
}

fn non_negative_count(field: &'static str, value: i64) -> Result<f64, ModelError> {
    if value < 0 {
        return Err(ModelError::InvalidArgument {
            field,
            value: value.to_string(),
        });
    }
    Ok(value as f64)
}

/// Impact of sending `prompt_count` prompts
pub fn usage_impact(prompt_count: i64) -> Result<ImpactResult, ModelError> {
    let prompts = non_negative_count("promptCount", prompt_count)?;
    Ok(ImpactResult {
        energy_kwh: prompts * ENERGY_PER_PROMPT_KWH,
        co2_kg: prompts * CO2_PER_PROMPT_KG,
    })
}

/// Impact of training `model_count` small models
pub fn training_impact(model_count: i64) -> Result<ImpactResult, ModelError> {
    let models = non_negative_count("modelCount", model_count)?;
    Ok(ImpactResult {
        energy_kwh: models * ENERGY_PER_TRAINING_RUN_KWH,
        co2_kg: models * CO2_PER_TRAINING_RUN_KG,
    })
}

/// Impact avoided by not sending `reduced_prompts` prompts.
///
/// Uses the same per-prompt factors as [`usage_impact`].
pub fn savings(reduced_prompts: i64) -> Result<ImpactResult, ModelError> {
    non_negative_count("reducedPrompts", reduced_prompts)?;
    usage_impact(reduced_prompts)
}

/// Trees needed for one year to absorb `total_co2_kg`
pub fn offset_trees(total_co2_kg: f64) -> Result<f64, ModelError> {
    if !total_co2_kg.is_finite() || total_co2_kg < 0.0 {
        return Err(ModelError::InvalidArgument {
            field: "totalCo2Kg",
            value: total_co2_kg.to_string(),
        });
    }
    Ok(total_co2_kg / CO2_ABSORBED_PER_TREE_KG_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_usage_impact() {
        assert_eq!(usage_impact(0).unwrap(), ImpactResult::ZERO);

        let result = usage_impact(10).unwrap();
        assert_close(result.energy_kwh, 0.02);
        assert_close(result.co2_kg, 0.005);
    }

    #[test]
    fn test_training_impact() {
        assert_eq!(
            training_impact(1).unwrap(),
            ImpactResult { energy_kwh: 2.0, co2_kg: 0.5 }
        );
        assert_eq!(
            training_impact(4).unwrap(),
            ImpactResult { energy_kwh: 8.0, co2_kg: 2.0 }
        );
    }

    #[test]
    fn test_savings_matches_usage() {
        for n in [0, 1, 7, 250, 10_000] {
            assert_eq!(savings(n).unwrap(), usage_impact(n).unwrap());
        }
    }

    #[test]
    fn test_offset_trees() {
        assert_eq!(offset_trees(22.0).unwrap(), 1.0);
        assert_eq!(offset_trees(0.0).unwrap(), 0.0);
        assert_close(offset_trees(11.0).unwrap(), 0.5);
    }

    #[test]
    fn test_negative_input_rejected() {
        let err = usage_impact(-1).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidArgument {
                field: "promptCount",
                value: "-1".to_string()
            }
        );
        assert!(training_impact(-3).is_err());
        assert!(savings(-10).is_err());
        assert!(offset_trees(-0.5).is_err());
    }

    #[test]
    fn test_offset_rejects_non_finite() {
        assert!(offset_trees(f64::NAN).is_err());
        assert!(offset_trees(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = savings(-2).unwrap_err();
        assert_eq!(err.to_string(), "reducedPrompts must be a non-negative number, got -2");
    }
}
