//! Statistical estimators for one-sample and two-sample analysis.
//!
//! Point estimators (`center`, `spread`, `shift`, ...) validate their
//! preconditions and delegate to the selection engines in `fast_center`,
//! `fast_spread`, and `fast_shift`. Bounds estimators additionally consult
//! the margin tables to pick rank indices before invoking those engines.
//!
//! All public functions are also reachable through the [`raw`] module, which
//! mirrors this module's contents verbatim for callers that prefer an
//! explicit namespace.

use crate::assumptions::{check_validity, log, AssumptionError, EstimatorError, Subject};
use crate::bounds::Bounds;
use crate::rng::Rng;

/// Default misrate (5%) used by the seedless bounds convenience wrappers.
pub const DEFAULT_MISRATE: f64 = 0.05;

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v
}

/// Type-7 quantile of an already-sorted slice.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = 1.0 + (n - 1) as f64 * p;
    let lo = (h.floor() as usize).clamp(1, n);
    let hi = (h.ceil() as usize).clamp(1, n);
    let w = h - lo as f64;
    (1.0 - w) * sorted[lo - 1] + w * sorted[hi - 1]
}

// =============================================================================
// Point estimators
// =============================================================================

/// Hodges-Lehmann pseudomedian: median of all pairwise averages `(x[i]+x[j])/2`.
pub fn center(x: &[f64]) -> Result<f64, EstimatorError> {
    check_validity(x, Subject::X)?;
    Ok(crate::fast_center::fast_center(x).map_err(EstimatorError::from)?)
}

/// Shamos scale estimator: median of all pairwise absolute differences `|x[i]-x[j]|`.
///
/// Returns `0.0` for a single-element sample. Otherwise fails the sparity
/// assumption (too many ties) whenever the result is not strictly positive.
pub fn spread(x: &[f64]) -> Result<f64, EstimatorError> {
    check_validity(x, Subject::X)?;
    let value = crate::fast_spread::fast_spread(x).map_err(EstimatorError::from)?;
    if x.len() == 1 {
        return Ok(value);
    }
    if value <= 0.0 {
        return Err(AssumptionError::sparity(Subject::X).into());
    }
    Ok(value)
}

/// Relative dispersion: `Spread(x) / |Center(x)|`.
pub fn rel_spread(x: &[f64]) -> Result<f64, EstimatorError> {
    let center_val = center(x)?;
    if center_val == 0.0 {
        return Err(AssumptionError::domain(Subject::X).into());
    }
    let spread_val = spread(x)?;
    Ok(spread_val / center_val.abs())
}

/// Typical difference between elements of `x` and `y`: the median of all
/// pairwise differences `x[i] - y[j]`.
pub fn shift(x: &[f64], y: &[f64]) -> Result<f64, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    let sx = sorted(x);
    let sy = sorted(y);
    let q = crate::fast_shift::fast_shift_quantiles(&sx, &sy, &[0.5])?;
    Ok(q[0])
}

/// How many times larger `x` is compared to `y`: `exp(Shift(log x, log y))`.
pub fn ratio(x: &[f64], y: &[f64]) -> Result<f64, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    let log_x = log(x, Subject::X)?;
    let log_y = log(y, Subject::Y)?;
    Ok(shift(&log_x, &log_y)?.exp())
}

/// Pooled variability of both samples: `(n*Spread(x) + m*Spread(y)) / (n+m)`.
pub fn avg_spread(x: &[f64], y: &[f64]) -> Result<f64, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    let n = x.len();
    let m = y.len();
    let spread_x = spread(x)?;
    let spread_y = spread(y)?;
    Ok((n as f64 * spread_x + m as f64 * spread_y) / (n + m) as f64)
}

/// Robust effect size: `Shift(x, y) / AvgSpread(x, y)`.
pub fn disparity(x: &[f64], y: &[f64]) -> Result<f64, EstimatorError> {
    let shift_val = shift(x, y)?;
    let avg_spread_val = avg_spread(x, y)?;
    Ok(shift_val / avg_spread_val)
}

// =============================================================================
// Bounds estimators
// =============================================================================

fn check_misrate(misrate: f64) -> Result<(), EstimatorError> {
    if misrate.is_nan() || !(0.0..=1.0).contains(&misrate) {
        return Err(AssumptionError::domain(Subject::Misrate).into());
    }
    Ok(())
}

/// Confidence bounds for `Center`, built from `SignedRankMargin` and
/// `FastCenterQuantiles`. Requires weak symmetry (documented, not enforced).
pub fn center_bounds(x: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    let n = x.len();
    if n < 2 {
        return Err(AssumptionError::domain(Subject::X).into());
    }
    let margin = crate::signed_rank_margin::signed_rank_margin(n, misrate)?;

    let total = (n * (n + 1) / 2) as i64;
    let half = ((margin / 2) as i64).min((total - 1) / 2);
    let k_left = half + 1;
    let k_right = total - half;

    let sx = sorted(x);
    let (lower, upper) = crate::fast_center_quantiles::fast_center_quantile_bounds(&sx, k_left, k_right);
    Ok(Bounds::unitless(lower, upper))
}

/// Pure order-statistic interval for the ordinary median: largest `k` with
/// `2*P(Binom(n,1/2) <= k-1) <= misrate`. No symmetry required.
pub fn median_bounds(x: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    let n = x.len();
    if n < 2 {
        return Err(AssumptionError::domain(Subject::X).into());
    }
    let k0 = crate::sign_margin::sign_margin(n, misrate)?;
    let k = k0 + 1;
    if k > n {
        return Err(AssumptionError::domain(Subject::Misrate).into());
    }

    let sx = sorted(x);
    Ok(Bounds::unitless(sx[k - 1], sx[n - k]))
}

/// Convenience wrapper using the default seed `"spread-bounds"`.
pub fn spread_bounds(x: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    spread_bounds_with_seed(x, misrate, "spread-bounds")
}

/// Confidence bounds for `Spread`. Pairs observations via a seeded shuffle,
/// forms `m = floor(n/2)` absolute differences, and picks a randomized
/// sign-test cutoff to trim both tails of the sorted differences.
pub fn spread_bounds_with_seed(x: &[f64], misrate: f64, seed: &str) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    let n = x.len();
    if n < 2 {
        return Err(AssumptionError::domain(Subject::X).into());
    }
    check_misrate(misrate)?;

    let m = n / 2;
    if m == 0 {
        return Err(AssumptionError::domain(Subject::X).into());
    }

    let mut rng = Rng::from_string(seed);
    let shuffled = rng.shuffle(x)?;

    let mut diffs: Vec<f64> = (0..m)
        .map(|i| (shuffled[2 * i] - shuffled[2 * i + 1]).abs())
        .collect();
    diffs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let cutoff = crate::sign_margin::sign_margin_randomized(m, misrate, &mut rng)?;
    let r = cutoff / 2;
    let half = r.min((m - 1) / 2);

    let lower = diffs[half];
    let upper = diffs[m - half - 1];
    if lower == 0.0 && upper == 0.0 {
        return Err(AssumptionError::sparity(Subject::X).into());
    }
    Ok(Bounds::unitless(lower, upper))
}

/// Confidence bounds for `Shift`, built from `PairwiseMargin` and `FastShift`.
pub fn shift_bounds(x: &[f64], y: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    let n = x.len();
    let m = y.len();
    let margin = crate::pairwise_margin::pairwise_margin(n, m, misrate)?;

    let sx = sorted(x);
    let sy = sorted(y);
    let total = (n as i64) * (m as i64);

    if total == 1 {
        let v = sx[0] - sy[0];
        return Ok(Bounds::unitless(v, v));
    }

    let half = ((margin / 2) as i64).min((total - 1) / 2);
    let p_lo = half as f64 / (total - 1) as f64;
    let p_hi = (total - 1 - half) as f64 / (total - 1) as f64;

    let values = crate::fast_shift::fast_shift_quantiles(&sx, &sy, &[p_lo, p_hi])?;
    Ok(Bounds::unitless(values[0].min(values[1]), values[0].max(values[1])))
}

/// Confidence bounds for `Ratio`: `exp(ShiftBounds(log x, log y, misrate))`.
pub fn ratio_bounds(x: &[f64], y: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    let log_x = log(x, Subject::X)?;
    let log_y = log(y, Subject::Y)?;
    let bounds = shift_bounds(&log_x, &log_y, misrate)?;
    Ok(Bounds::unitless(bounds.lower.exp(), bounds.upper.exp()))
}

/// Convenience wrapper using the default seed `"avg-spread-bounds"`.
pub fn avg_spread_bounds(x: &[f64], y: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    avg_spread_bounds_with_seed(x, y, misrate, "avg-spread-bounds")
}

/// Confidence bounds for `AvgSpread`: a Bonferroni split between per-sample
/// `SpreadBounds`, combined as a weighted average with weights `n/(n+m)`
/// and `m/(n+m)`.
pub fn avg_spread_bounds_with_seed(
    x: &[f64],
    y: &[f64],
    misrate: f64,
    seed: &str,
) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    check_misrate(misrate)?;

    let alpha = misrate / 2.0;
    let bx = spread_bounds_with_seed(x, alpha, &format!("{seed}-x"))?;
    let by = spread_bounds_with_seed(y, alpha, &format!("{seed}-y"))?;

    let n = x.len() as f64;
    let m = y.len() as f64;
    let wx = n / (n + m);
    let wy = m / (n + m);
    Ok(Bounds::unitless(
        wx * bx.lower + wy * by.lower,
        wx * bx.upper + wy * by.upper,
    ))
}

/// Convenience wrapper using the default seed `"disparity-bounds"`.
pub fn disparity_bounds(x: &[f64], y: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    disparity_bounds_with_seed(x, y, misrate, "disparity-bounds")
}

/// Confidence bounds for `Disparity`: a Bonferroni split between
/// `ShiftBounds` and `AvgSpreadBounds`, divided pointwise. `AvgSpread` is
/// never negative, so the denominator interval only "straddles zero" when
/// its lower bound collapses to exactly 0; that case widens the result
/// toward the sign of the numerator instead of producing a NaN.
pub fn disparity_bounds_with_seed(
    x: &[f64],
    y: &[f64],
    misrate: f64,
    seed: &str,
) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    check_validity(y, Subject::Y)?;
    check_misrate(misrate)?;

    let alpha = misrate / 2.0;
    let shift_b = shift_bounds(x, y, alpha)?;
    let spread_b = avg_spread_bounds_with_seed(x, y, alpha, seed)?;

    let (lower, upper) = divide_bounds(shift_b.lower, shift_b.upper, spread_b.lower, spread_b.upper);
    Ok(Bounds::unitless(lower, upper))
}

/// Interval division `[a_lo,a_hi] / [b_lo,b_hi]` assuming `b_hi >= 0`
/// (AvgSpread bounds are never negative). Widens toward the numerator's
/// sign when the denominator interval touches zero.
fn divide_bounds(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> (f64, f64) {
    if b_lo > 0.0 {
        return (a_lo / b_hi, a_hi / b_lo);
    }

    let lower = if a_hi < 0.0 {
        f64::NEG_INFINITY
    } else if a_lo > 0.0 {
        a_lo / b_hi
    } else {
        f64::NEG_INFINITY
    };
    let upper = if a_lo > 0.0 {
        f64::INFINITY
    } else if a_hi < 0.0 {
        a_hi / b_hi
    } else {
        f64::INFINITY
    };
    (lower, upper)
}

const BOOTSTRAP_ITERATIONS: usize = 10_000;
const BOOTSTRAP_MAX_SUBSAMPLE: usize = 5_000;

/// Convenience wrapper using the default seed `"center-bounds-approx"`.
pub fn center_bounds_approx(x: &[f64], misrate: f64) -> Result<Bounds, EstimatorError> {
    center_bounds_approx_with_seed(x, misrate, "center-bounds-approx")
}

/// Bootstrap percentile interval for `Center`. Resamples with replacement
/// `B = 10,000` times (subsample size `min(n, 5000)`), computes `FastCenter`
/// on each resample, and returns the `alpha/2` and `1-alpha/2` percentiles
/// of the bootstrap distribution. Rescales around the sample center by
/// `sqrt(n/m)` when subsampling (`m < n`).
pub fn center_bounds_approx_with_seed(
    x: &[f64],
    misrate: f64,
    seed: &str,
) -> Result<Bounds, EstimatorError> {
    check_validity(x, Subject::X)?;
    let n = x.len();
    if n < 2 {
        return Err(AssumptionError::domain(Subject::X).into());
    }
    check_misrate(misrate)?;

    let min_misrate = (2.0 / BOOTSTRAP_ITERATIONS as f64).max(2.0_f64.powf(1.0 - n as f64));
    if misrate < min_misrate {
        return Err(AssumptionError::domain(Subject::Misrate).into());
    }

    let m = n.min(BOOTSTRAP_MAX_SUBSAMPLE);
    let mut rng = Rng::from_string(seed);

    let mut boot: Vec<f64> = Vec::with_capacity(BOOTSTRAP_ITERATIONS);
    for _ in 0..BOOTSTRAP_ITERATIONS {
        let resampled = rng.resample(x, m)?;
        boot.push(center(&resampled)?);
    }
    boot.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let alpha = misrate / 2.0;
    let lo = quantile_sorted(&boot, alpha);
    let hi = quantile_sorted(&boot, 1.0 - alpha);

    if m < n {
        let c = center(x)?;
        let scale = (n as f64 / m as f64).sqrt();
        Ok(Bounds::unitless(c + (lo - c) * scale, c + (hi - c) * scale))
    } else {
        Ok(Bounds::unitless(lo, hi))
    }
}

/// Re-exports of this module's public functions under an explicit
/// namespace, for callers that prefer `estimators::raw::center(...)`.
pub mod raw {
    pub use super::*;
}
