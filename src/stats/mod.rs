//! Descriptive statistics shared by the control-chart and capability
//! calculators.
//!
//! Every function takes a plain `&[f64]` and validates it explicitly: empty
//! or too-short inputs and non-finite values are reported as
//! [`QualityError::InvalidInput`] rather than producing `NaN`.
//!
//! # Algorithms
//!
//! - **Mean**: Kahan compensated summation.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//!
//! Control-chart constants (d2, d3, A2, D3, D4) live in [`constants`].

pub mod constants;

pub use constants::{
    a2, chart_constants, d2, d3, d3_lower, d4, estimate_sigma_from_range, ChartConstants,
};

use crate::error::{ensure_finite, QualityError, Result};

/// Arithmetic mean.
///
/// # Errors
///
/// `InvalidInput` if `values` is empty or holds a non-finite value.
///
/// # Examples
///
/// ```
/// use u_quality::stats::mean;
/// assert!((mean(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 2.5).abs() < 1e-15);
/// assert!(mean(&[]).is_err());
/// ```
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(QualityError::invalid(
            "mean requires at least one value",
        ));
    }
    ensure_finite(values, "values")?;
    Ok(kahan_sum(values) / values.len() as f64)
}

/// Sample variance (Bessel-corrected, divisor `n - 1`).
///
/// # Errors
///
/// `InvalidInput` if fewer than 2 values are given.
pub fn variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(QualityError::invalid(format!(
            "sample standard deviation requires at least 2 values, got {}",
            values.len()
        )));
    }
    ensure_finite(values, "values")?;
    let (n, m2) = welford(values);
    Ok(m2 / (n - 1.0))
}

/// Sample standard deviation (Bessel-corrected, divisor `n - 1`).
///
/// # Examples
///
/// ```
/// use u_quality::stats::std_dev;
/// let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - 2.138).abs() < 0.001);
/// ```
pub fn std_dev(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

/// Population standard deviation (divisor `n`).
///
/// # Errors
///
/// `InvalidInput` if `values` is empty.
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(QualityError::invalid(
            "population standard deviation requires at least one value",
        ));
    }
    ensure_finite(values, "values")?;
    let (n, m2) = welford(values);
    Ok((m2 / n).sqrt())
}

/// `max - min`.
///
/// # Errors
///
/// `InvalidInput` if `values` is empty.
pub fn range(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(QualityError::invalid(
            "range requires at least one value",
        ));
    }
    ensure_finite(values, "values")?;
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    Ok(hi - lo)
}

/// Median; the average of the two middle elements for even counts.
///
/// The input is copied, not reordered.
///
/// # Errors
///
/// `InvalidInput` if `values` is empty.
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(QualityError::invalid(
            "median requires at least one value",
        ));
    }
    ensure_finite(values, "values")?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Lazily yields `|values[i] - values[i - 1]|` for `i = 1..n`.
///
/// Produces `n - 1` items, or nothing when `n <= 1`.
pub fn moving_range(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.windows(2).map(|w| (w[1] - w[0]).abs())
}

/// Mean of [`moving_range`]; `0.0` when fewer than 2 values are given.
pub fn average_moving_range(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ranges: Vec<f64> = moving_range(values).collect();
    kahan_sum(&ranges) / ranges.len() as f64
}

/// Kahan-Babuska compensated sum.
pub(crate) fn kahan_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Returns `(n, M2)`, the count and sum of squared deviations from the mean.
fn welford(values: &[f64]) -> (f64, f64) {
    let mut count = 0.0_f64;
    let mut running_mean = 0.0_f64;
    let mut m2 = 0.0_f64;
    for &x in values {
        count += 1.0;
        let delta = x - running_mean;
        running_mean += delta / count;
        m2 += delta * (x - running_mean);
    }
    (count, m2)
}
