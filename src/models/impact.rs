//! Impact data models
//!
//! Queries submitted by visitors and the derived energy and emission figures

use serde::{Deserialize, Serialize};

/// Number of prompts a visitor generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageQuery {
    /// Signed so negative values reach validation instead of failing to parse
    pub prompt_count: i64,
}

/// Number of small models a visitor trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingQuery {
    pub model_count: i64,
}

/// Number of prompts a visitor avoids sending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsQuery {
    pub reduced_prompts: i64,
}

/// Total emissions to convert into offset trees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetQuery {
    pub total_co2_kg: f64,
}

/// Energy used and CO2 emitted by some amount of AI activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    /// Electricity in kilowatt-hours
    #[serde(rename = "energyKWh")]
    pub energy_kwh: f64,
    /// CO2 in kilograms
    #[serde(rename = "co2Kg")]
    pub co2_kg: f64,
}

impl ImpactResult {
    pub const ZERO: ImpactResult = ImpactResult {
        energy_kwh: 0.0,
        co2_kg: 0.0,
    };
}

/// Trees needed for a year to absorb some amount of CO2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetEstimate {
    pub trees_per_year: f64,
    /// The CO2 total the estimate was derived from
    pub total_co2_kg: f64,
    /// Which recorded results contributed to the total
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ImpactComponent>,
}

/// Source of a CO2 figure folded into an offset estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactComponent {
    Usage,
    Training,
}
