//! Metric formatting
//!
//! Renders impact figures the way the dashboard labels them

use crate::models::ImpactResult;

/// Usage energy, three decimals
pub fn usage_energy(result: &ImpactResult) -> String {
    format!("{:.3}", result.energy_kwh)
}

/// Usage CO2, four decimals
pub fn usage_co2(result: &ImpactResult) -> String {
    format!("{:.4}", result.co2_kg)
}

/// Training energy, whole kWh with thousands separators
pub fn training_energy(result: &ImpactResult) -> String {
    grouped_integer(result.energy_kwh)
}

/// Training CO2, shortest decimal form with thousands separators
pub fn training_co2(result: &ImpactResult) -> String {
    grouped_decimal(result.co2_kg)
}

/// Trees per year, two decimals
pub fn trees(trees_per_year: f64) -> String {
    format!("{:.2}", trees_per_year)
}

/// `2000.0` -> `2,000`
pub fn grouped_integer(value: f64) -> String {
    let rendered = format!("{:.0}", value);
    let (sign, digits) = split_sign(&rendered);
    format!("{}{}", sign, group_digits(digits))
}

/// `2000.5` -> `2,000.5`, `2.0` -> `2.0`
pub fn grouped_decimal(value: f64) -> String {
    let rendered = value.to_string();
    let (sign, unsigned) = split_sign(&rendered);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "0"));
    format!("{}{}.{}", sign, group_digits(whole), fraction)
}

fn split_sign(rendered: &str) -> (&str, &str) {
    match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
