//! Shewhart control-chart constants, tabulated by subgroup size n = 2..=10.
//!
//! Values are the standard published factors (ASTM E2587). They have no
//! closed form here and are stored as one static table.
//!
//! | n | d2 | d3 | A2 | D3 | D4 |
//! |---|----|----|----|----|----|
//! | 2 | 1.128 | 0.853 | 1.880 | 0 | 3.267 |
//! | 5 | 2.326 | 0.864 | 0.577 | 0 | 2.114 |
//! | 10 | 3.078 | 0.797 | 0.308 | 0.223 | 1.777 |

use serde::Serialize;

use crate::error::{QualityError, Result};

/// Smallest tabulated subgroup size.
pub const MIN_SUBGROUP_SIZE: usize = 2;

/// Largest tabulated subgroup size.
pub const MAX_SUBGROUP_SIZE: usize = 10;

/// Control-chart factors for one subgroup size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartConstants {
    /// Subgroup size.
    pub n: usize,
    /// Mean of the relative range; sigma-hat = R-bar / d2.
    pub d2: f64,
    /// Standard deviation of the relative range.
    pub d3: f64,
    /// X-bar chart limit factor; limits = X-double-bar +/- A2 * R-bar.
    pub a2: f64,
    /// R chart lower limit factor (capital D3); LCL = D3 * R-bar.
    pub d3_lower: f64,
    /// R chart upper limit factor; UCL = D4 * R-bar.
    pub d4: f64,
}

const fn row(n: usize, d2: f64, d3: f64, a2: f64, d3_lower: f64, d4: f64) -> ChartConstants {
    ChartConstants {
        n,
        d2,
        d3,
        a2,
        d3_lower,
        d4,
    }
}

/// Index 0 corresponds to n = 2.
static TABLE: [ChartConstants; 9] = [
    row(2, 1.128, 0.853, 1.880, 0.000, 3.267),
    row(3, 1.693, 0.888, 1.023, 0.000, 2.574),
    row(4, 2.059, 0.880, 0.729, 0.000, 2.282),
    row(5, 2.326, 0.864, 0.577, 0.000, 2.114),
    row(6, 2.534, 0.848, 0.483, 0.000, 2.004),
    row(7, 2.704, 0.833, 0.419, 0.076, 1.924),
    row(8, 2.847, 0.820, 0.373, 0.136, 1.864),
    row(9, 2.970, 0.808, 0.337, 0.184, 1.816),
    row(10, 3.078, 0.797, 0.308, 0.223, 1.777),
];

fn lookup(name: &'static str, n: usize) -> Result<&'static ChartConstants> {
    if !(MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&n) {
        return Err(QualityError::OutOfRange { name, size: n });
    }
    Ok(&TABLE[n - MIN_SUBGROUP_SIZE])
}

/// All factors for subgroup size `n`.
///
/// # Errors
///
/// [`QualityError::OutOfRange`] unless `2 <= n <= 10`.
///
/// # Examples
///
/// ```
/// use u_quality::stats::chart_constants;
///
/// let c = chart_constants(5).unwrap();
/// assert_eq!(c.d2, 2.326);
/// assert_eq!(c.a2, 0.577);
/// assert!(chart_constants(15).unwrap_err().is_out_of_range());
/// ```
pub fn chart_constants(n: usize) -> Result<&'static ChartConstants> {
    lookup("chart", n)
}

/// d2 for subgroup size `n`.
pub fn d2(n: usize) -> Result<f64> {
    lookup("d2", n).map(|c| c.d2)
}

/// d3 for subgroup size `n`.
pub fn d3(n: usize) -> Result<f64> {
    lookup("d3", n).map(|c| c.d3)
}

/// A2 for subgroup size `n`.
pub fn a2(n: usize) -> Result<f64> {
    lookup("A2", n).map(|c| c.a2)
}

/// D3 (R chart lower-limit factor) for subgroup size `n`.
///
/// Zero for `n <= 6`.
pub fn d3_lower(n: usize) -> Result<f64> {
    lookup("D3", n).map(|c| c.d3_lower)
}

/// D4 for subgroup size `n`.
pub fn d4(n: usize) -> Result<f64> {
    lookup("D4", n).map(|c| c.d4)
}

/// Estimates process sigma as `average_range / d2(n)`.
pub fn estimate_sigma_from_range(average_range: f64, subgroup_size: usize) -> Result<f64> {
    Ok(average_range / d2(subgroup_size)?)
}
