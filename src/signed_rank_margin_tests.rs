use crate::assumptions::Subject;
use crate::signed_rank_margin::signed_rank_margin;

#[test]
fn rejects_empty_sample() {
    let err = signed_rank_margin(0, 0.05).unwrap_err();
    assert_eq!(err.violation().subject, Subject::X);
}

#[test]
fn rejects_misrate_out_of_range() {
    assert!(signed_rank_margin(10, -0.1).is_err());
    assert!(signed_rank_margin(10, 1.1).is_err());
    assert!(signed_rank_margin(10, f64::NAN).is_err());
}

#[test]
fn rejects_misrate_below_minimum() {
    let err = signed_rank_margin(4, 1e-20).unwrap_err();
    assert_eq!(err.violation().subject, Subject::Misrate);
}

#[test]
fn margin_is_bounded_by_total_ranks() {
    let n = 10;
    let total = n * (n + 1) / 2;
    let margin = signed_rank_margin(n, 0.05).unwrap();
    assert!(margin <= total);
}

#[test]
fn margin_shrinks_as_misrate_grows() {
    let tight = signed_rank_margin(20, 0.3).unwrap();
    let loose = signed_rank_margin(20, 0.01).unwrap();
    assert!(tight >= loose);
}
