//! Energy model tests
//!
//! Formula values, linearity and input rejection through the public API

use aipowermeter::energy::{self, ModelError};
use aipowermeter::ImpactResult;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_known_values() {
    assert_eq!(energy::usage_impact(0).unwrap(), ImpactResult::ZERO);

    let usage = energy::usage_impact(10).unwrap();
    assert_close(usage.energy_kwh, 0.02);
    assert_close(usage.co2_kg, 0.005);

    assert_eq!(
        energy::training_impact(1).unwrap(),
        ImpactResult { energy_kwh: 2.0, co2_kg: 0.5 }
    );
    assert_eq!(
        energy::training_impact(4).unwrap(),
        ImpactResult { energy_kwh: 8.0, co2_kg: 2.0 }
    );

    assert_eq!(energy::offset_trees(22.0).unwrap(), 1.0);
    assert_eq!(energy::offset_trees(0.0).unwrap(), 0.0);
}

#[test]
fn test_usage_is_linear() {
    let unit = energy::usage_impact(1).unwrap();
    for n in [0_i64, 1, 2, 3, 17, 365, 1_000, 123_456] {
        let result = energy::usage_impact(n).unwrap();
        assert_eq!(result.energy_kwh, n as f64 * unit.energy_kwh);
        assert_eq!(result.co2_kg, n as f64 * unit.co2_kg);
    }
}

#[test]
fn test_training_is_linear() {
    let unit = energy::training_impact(1).unwrap();
    for n in [0_i64, 5, 99, 10_000] {
        let result = energy::training_impact(n).unwrap();
        assert_eq!(result.energy_kwh, n as f64 * unit.energy_kwh);
        assert_eq!(result.co2_kg, n as f64 * unit.co2_kg);
    }
}

#[test]
fn test_outputs_never_negative() {
    for n in [0_i64, 1, i32::MAX as i64] {
        let usage = energy::usage_impact(n).unwrap();
        let training = energy::training_impact(n).unwrap();
        assert!(usage.energy_kwh >= 0.0 && usage.co2_kg >= 0.0);
        assert!(training.energy_kwh >= 0.0 && training.co2_kg >= 0.0);
    }
}

#[test]
fn test_negative_inputs_report_field() {
    let cases: Vec<(Result<ImpactResult, ModelError>, &str)> = vec![
        (energy::usage_impact(-1), "promptCount"),
        (energy::training_impact(-1), "modelCount"),
        (energy::savings(-1), "reducedPrompts"),
    ];

    for (result, expected_field) in cases {
        match result {
            Err(ModelError::InvalidArgument { field, value }) => {
                assert_eq!(field, expected_field);
                assert_eq!(value, "-1");
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    assert!(matches!(
        energy::offset_trees(-22.0),
        Err(ModelError::InvalidArgument { field: "totalCo2Kg", .. })
    ));
}
