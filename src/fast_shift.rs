//! Fast O((m+n) log L) quantiles of the pairwise cross-sample difference set
//! `{x[i] - y[j]}`, without materializing the m*n differences.
//!
//! Internal implementation - not part of public API.

use crate::assumptions::{AssumptionError, Subject};
use std::collections::HashMap;

const MAX_ITERATIONS: usize = 128;

/// Computes the type-7 quantiles of `{x[i] - y[j]}` at each probability in
/// `probs`, returning one value per entry of `probs` in the same order.
///
/// `x_sorted` and `y_sorted` must already be sorted ascending and non-empty.
pub(crate) fn fast_shift_quantiles(
    x_sorted: &[f64],
    y_sorted: &[f64],
    probs: &[f64],
) -> Result<Vec<f64>, AssumptionError> {
    let m = x_sorted.len();
    let n = y_sorted.len();

    if m == 0 {
        return Err(AssumptionError::validity(Subject::X));
    }
    if n == 0 {
        return Err(AssumptionError::validity(Subject::Y));
    }
    if probs.is_empty() {
        return Err(AssumptionError::domain(Subject::Misrate));
    }
    for &p in probs {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return Err(AssumptionError::domain(Subject::Misrate));
        }
    }

    let total = (m as i64) * (n as i64);

    // For each probability compute the two bracketing 1-based ranks and the
    // interpolation weight between them (type-7 quantile).
    let mut plan: Vec<(i64, i64, f64)> = Vec::with_capacity(probs.len());
    let mut ranks: Vec<i64> = Vec::with_capacity(probs.len() * 2);
    for &p in probs {
        let h = 1.0 + (total - 1) as f64 * p;
        let lo = (h.floor() as i64).clamp(1, total);
        let hi = (h.ceil() as i64).clamp(1, total);
        let w = (h - lo as f64).clamp(0.0, 1.0);
        ranks.push(lo);
        ranks.push(hi);
        plan.push((lo, hi, w));
    }
    ranks.sort_unstable();
    ranks.dedup();

    let mut resolved: HashMap<i64, f64> = HashMap::with_capacity(ranks.len());
    for k in ranks {
        let v = select_kth_pairwise_diff(x_sorted, y_sorted, k)?;
        resolved.insert(k, v);
    }

    let mut out = Vec::with_capacity(plan.len());
    for (lo, hi, w) in plan {
        let lo_v = resolved[&lo];
        if lo == hi {
            out.push(lo_v);
        } else {
            let hi_v = resolved[&hi];
            out.push((1.0 - w) * lo_v + w * hi_v);
        }
    }
    Ok(out)
}

/// Binary search to find the k-th smallest pairwise difference x[i] - y[j]
/// without materializing all m*n differences.
fn select_kth_pairwise_diff(x: &[f64], y: &[f64], k: i64) -> Result<f64, AssumptionError> {
    let m = x.len();
    let n = y.len();

    let mut search_min = x[0] - y[n - 1];
    let mut search_max = x[m - 1] - y[0];

    if search_min.is_nan() || search_max.is_nan() {
        return Err(AssumptionError::validity(Subject::X));
    }

    let mut prev_min = f64::NEG_INFINITY;
    let mut prev_max = f64::INFINITY;

    for _ in 0..MAX_ITERATIONS {
        if search_min == search_max {
            return Ok(search_min);
        }

        let mid = midpoint(search_min, search_max);
        let (count_le, closest_below, closest_above) = count_and_neighbors(x, y, mid);

        // Exact value found.
        if closest_below == closest_above {
            return Ok(closest_below);
        }

        // Stuck: no progress between iterations.
        if search_min == prev_min && search_max == prev_max {
            return Ok(if count_le >= k {
                closest_below
            } else {
                closest_above
            });
        }

        prev_min = search_min;
        prev_max = search_max;

        if count_le >= k {
            search_max = closest_below;
        } else {
            search_min = closest_above;
        }
    }

    Err(AssumptionError::numerical(Subject::X))
}

/// Counts how many pairs x[i] - y[j] <= threshold using a two-pointer algorithm.
/// Also tracks the closest actual differences on either side of threshold.
/// Returns (count_less_or_equal, closest_below, closest_above).
fn count_and_neighbors(x: &[f64], y: &[f64], threshold: f64) -> (i64, f64, f64) {
    let m = x.len();
    let n = y.len();
    let mut count: i64 = 0;
    let mut max_below = f64::NEG_INFINITY;
    let mut min_above = f64::INFINITY;

    // Two-pointer algorithm: for each x[i], find the largest j where x[i] - y[j] > threshold
    let mut j = 0;
    for &xi in x.iter() {
        while j < n && xi - y[j] > threshold {
            j += 1;
        }

        count += (n - j) as i64;

        if j < n {
            let diff = xi - y[j];
            if diff > max_below {
                max_below = diff;
            }
        }

        if j > 0 {
            let diff = xi - y[j - 1];
            if diff < min_above {
                min_above = diff;
            }
        }
    }

    if max_below.is_infinite() && max_below.is_sign_negative() {
        max_below = x[0] - y[n - 1];
    }
    if min_above.is_infinite() && min_above.is_sign_positive() {
        min_above = x[m - 1] - y[0];
    }

    (count, max_below, min_above)
}

/// Computes the midpoint of two numbers, avoiding overflow
fn midpoint(a: f64, b: f64) -> f64 {
    a + (b - a) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_quantile(x: &[f64], y: &[f64], p: f64) -> f64 {
        let mut diffs = Vec::new();
        for &xi in x {
            for &yj in y {
                diffs.push(xi - yj);
            }
        }
        diffs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let total = diffs.len();
        let h = 1.0 + (total - 1) as f64 * p;
        let lo = h.floor() as usize;
        let hi = h.ceil() as usize;
        let w = h - lo as f64;
        (1.0 - w) * diffs[lo - 1] + w * diffs[hi - 1]
    }

    #[test]
    fn median_matches_naive() {
        let x = vec![1.0, 3.0, 5.0, 7.0, 9.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let expected = naive_quantile(&x, &y, 0.5);
        let actual = fast_shift_quantiles(&x, &y, &[0.5]).unwrap()[0];
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn multiple_probabilities_are_monotone() {
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..15).map(|i| (i as f64) * 1.3).collect();
        let probs = vec![0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
        let values = fast_shift_quantiles(&x, &y, &probs).unwrap();
        for w in values.windows(2) {
            assert!(w[0] <= w[1] + 1e-9);
        }
    }

    #[test]
    fn empty_input_fails_validity() {
        assert!(fast_shift_quantiles(&[], &[1.0], &[0.5]).is_err());
        assert!(fast_shift_quantiles(&[1.0], &[], &[0.5]).is_err());
    }

    #[test]
    fn out_of_range_probability_fails_domain() {
        assert!(fast_shift_quantiles(&[1.0, 2.0], &[1.0, 2.0], &[1.5]).is_err());
        assert!(fast_shift_quantiles(&[1.0, 2.0], &[1.0, 2.0], &[f64::NAN]).is_err());
    }
}
