//! Assumption violation conformance tests.
//!
//! Verifies that each estimator reports the `(id, subject)` pair the error
//! taxonomy promises, independent of any one algorithm's internals.

use pragmastat::{
    avg_spread, center, center_bounds, center_bounds_approx, disparity, median_bounds, ratio,
    rel_spread, shift, spread, AssumptionId, EstimatorError, Subject,
};

fn violation(err: EstimatorError) -> (AssumptionId, Subject) {
    match err {
        EstimatorError::Assumption(ae) => (ae.violation().id, ae.violation().subject),
        EstimatorError::Other(msg) => panic!("expected AssumptionError, got Other: {msg}"),
    }
}

#[test]
fn center_rejects_empty() {
    let (id, subject) = violation(center(&[]).unwrap_err());
    assert_eq!(id, AssumptionId::Validity);
    assert_eq!(subject, Subject::X);
}

#[test]
fn center_rejects_nan() {
    let (id, _) = violation(center(&[1.0, f64::NAN]).unwrap_err());
    assert_eq!(id, AssumptionId::Validity);
}

#[test]
fn spread_rejects_tie_dominant_sample() {
    let (id, subject) = violation(spread(&[5.0, 5.0, 5.0]).unwrap_err());
    assert_eq!(id, AssumptionId::Sparity);
    assert_eq!(subject, Subject::X);
}

#[test]
fn rel_spread_rejects_zero_center() {
    let (id, subject) = violation(rel_spread(&[-1.0, 0.0, 1.0]).unwrap_err());
    assert_eq!(id, AssumptionId::Domain);
    assert_eq!(subject, Subject::X);
}

#[test]
fn shift_rejects_empty_y() {
    let (id, subject) = violation(shift(&[1.0, 2.0], &[]).unwrap_err());
    assert_eq!(id, AssumptionId::Validity);
    assert_eq!(subject, Subject::Y);
}

#[test]
fn ratio_rejects_nonpositive_y() {
    let (id, subject) = violation(ratio(&[1.0, 2.0], &[0.0, 1.0]).unwrap_err());
    assert_eq!(id, AssumptionId::Positivity);
    assert_eq!(subject, Subject::Y);
}

#[test]
fn avg_spread_propagates_sparity_from_either_side() {
    let (id, subject) = violation(avg_spread(&[5.0, 5.0], &[1.0, 2.0]).unwrap_err());
    assert_eq!(id, AssumptionId::Sparity);
    assert_eq!(subject, Subject::X);
}

#[test]
fn disparity_propagates_sparity() {
    let (id, subject) = violation(disparity(&[1.0, 1.0], &[1.0, 2.0]).unwrap_err());
    assert_eq!(id, AssumptionId::Sparity);
    assert_eq!(subject, Subject::X);
}

#[test]
fn median_bounds_rejects_single_element() {
    let (id, subject) = violation(median_bounds(&[1.0], 0.1).unwrap_err());
    assert_eq!(id, AssumptionId::Domain);
    assert_eq!(subject, Subject::X);
}

#[test]
fn center_bounds_rejects_single_element() {
    let (id, subject) = violation(center_bounds(&[1.0], 0.05).unwrap_err());
    assert_eq!(id, AssumptionId::Domain);
    assert_eq!(subject, Subject::X);
}

#[test]
fn center_bounds_approx_rejects_misrate_below_minimum() {
    let x: Vec<f64> = (1..=4).map(|v| v as f64).collect();
    let (id, subject) = violation(center_bounds_approx(&x, 1e-20).unwrap_err());
    assert_eq!(id, AssumptionId::Domain);
    assert_eq!(subject, Subject::Misrate);
}
