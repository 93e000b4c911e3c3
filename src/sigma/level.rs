//! Sigma quality level, DPMO, and yield conversions.
//!
//! Uses the Motorola convention of a long-term 1.5-sigma drift of the
//! process mean:
//!
//! ```text
//! sigma = Phi_inv(1 - DPMO / 1,000,000) + 1.5
//! DPMO  = 1,000,000 * (1 - Phi(sigma - 1.5))
//! ```
//!
//! # References
//!
//! - Harry & Schroeder (2000), *Six Sigma: The Breakthrough Management
//!   Strategy Revolutionizing the World's Top Corporations*.
//! - Motorola University, "The Six Sigma Process" (defining the 1.5-sigma
//!   shift convention).

use serde::{Deserialize, Serialize};

use super::benchmarks::SigmaRating;
use crate::config::QualityConfig;
use crate::error::{QualityError, Result};
use crate::special::{inverse_normal_cdf, standard_normal_cdf};

const MILLION: f64 = 1_000_000.0;

/// Sigma level reported for a defect-free process.
pub const PERFECT_SIGMA: f64 = 6.0;

/// Canonical DPMO of a six sigma process.
pub const SIX_SIGMA_DPMO: f64 = 3.4;

/// Output of a sigma-level calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigmaLevelResult {
    /// Short-term sigma level, including the long-term shift.
    pub sigma_level: f64,
    /// Defects per million opportunities.
    pub dpmo: f64,
    /// Defect-free opportunities, in percent.
    pub yield_percent: f64,
    /// `total_units * opportunities_per_unit`.
    pub total_opportunities: i64,
    /// Observed defects.
    pub total_defects: i64,
    /// Inspected units.
    pub total_units: i64,
    /// Defect opportunities per unit.
    pub opportunities_per_unit: i64,
    /// Tier of `sigma_level`.
    pub rating: SigmaRating,
    /// Industry comparison for the tier.
    pub benchmark: String,
}

impl SigmaLevelResult {
    /// Returns `true` at or above six sigma.
    pub fn meets_six_sigma(&self) -> bool {
        self.sigma_level >= PERFECT_SIGMA - 1e-9
    }

    /// Average defects found per unit.
    pub fn defects_per_unit(&self) -> f64 {
        self.total_defects as f64 / self.total_units as f64
    }
}

/// Converts between defect counts, DPMO, yield and sigma level.
///
/// # Examples
///
/// ```
/// use u_quality::sigma::SigmaCalculator;
///
/// let calc = SigmaCalculator::new();
/// let result = calc.calculate(1000, 0, 10).unwrap();
/// assert!((result.sigma_level - 6.0).abs() < 1e-12);
/// assert!(result.meets_six_sigma());
///
/// let sigma = calc.dpmo_to_sigma(66_807.0);
/// assert!((sigma - 3.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SigmaCalculator {
    config: QualityConfig,
}

impl SigmaCalculator {
    /// Calculator with the conventional 1.5-sigma shift.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration (only `sigma_shift` is used).
    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Sigma level, DPMO and yield from inspection counts.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `total_units` or `opportunities_per_unit` is not
    /// positive, `total_defects` is negative, or the opportunity count
    /// overflows.
    pub fn calculate(
        &self,
        total_units: i64,
        total_defects: i64,
        opportunities_per_unit: i64,
    ) -> Result<SigmaLevelResult> {
        if total_units <= 0 {
            return Err(QualityError::invalid(format!(
                "total units must be positive, got {total_units}"
            )));
        }
        if total_defects < 0 {
            return Err(QualityError::invalid(format!(
                "total defects cannot be negative, got {total_defects}"
            )));
        }
        if opportunities_per_unit <= 0 {
            return Err(QualityError::invalid(format!(
                "opportunities per unit must be positive, got {opportunities_per_unit}"
            )));
        }
        let total_opportunities = total_units
            .checked_mul(opportunities_per_unit)
            .ok_or_else(|| QualityError::invalid("total opportunities overflow"))?;

        let defect_rate = total_defects as f64 / total_opportunities as f64;
        let dpmo = defect_rate * MILLION;
        let sigma_level = self.dpmo_to_sigma(dpmo);
        let rating = SigmaRating::from_sigma(sigma_level);

        let result = SigmaLevelResult {
            sigma_level,
            dpmo,
            yield_percent: (1.0 - defect_rate) * 100.0,
            total_opportunities,
            total_defects,
            total_units,
            opportunities_per_unit,
            rating,
            benchmark: rating.benchmark().to_string(),
        };
        tracing::debug!(
            units = total_units,
            defects = total_defects,
            dpmo = result.dpmo,
            sigma = result.sigma_level,
            "computed sigma level"
        );
        Ok(result)
    }

    /// Sigma level for a DPMO figure.
    ///
    /// `dpmo <= 0` gives 6.0 and `dpmo >= 1,000,000` gives 0.0.
    pub fn dpmo_to_sigma(&self, dpmo: f64) -> f64 {
        if dpmo <= 0.0 {
            return PERFECT_SIGMA;
        }
        if dpmo >= MILLION {
            return 0.0;
        }
        // Phi_inv(1 - p) = -Phi_inv(p); avoids 1 - p rounding to 1 for tiny p.
        -inverse_normal_cdf(dpmo / MILLION) + self.config.sigma_shift
    }

    /// DPMO for a sigma level.
    ///
    /// Levels at or above 6 return the canonical 3.4 directly.
    pub fn sigma_to_dpmo(&self, sigma_level: f64) -> f64 {
        if sigma_level >= PERFECT_SIGMA {
            return SIX_SIGMA_DPMO;
        }
        let z = sigma_level - self.config.sigma_shift;
        (1.0 - standard_normal_cdf(z)) * MILLION
    }

    /// Yield in percent for a sigma level: `100 - DPMO / 10,000`.
    pub fn sigma_to_yield(&self, sigma_level: f64) -> f64 {
        100.0 - self.sigma_to_dpmo(sigma_level) / 10_000.0
    }
}

/// [`SigmaCalculator::calculate`] with the default shift.
pub fn calculate(
    total_units: i64,
    total_defects: i64,
    opportunities_per_unit: i64,
) -> Result<SigmaLevelResult> {
    SigmaCalculator::new().calculate(total_units, total_defects, opportunities_per_unit)
}

/// [`SigmaCalculator::dpmo_to_sigma`] with the default shift.
pub fn dpmo_to_sigma(dpmo: f64) -> f64 {
    SigmaCalculator::new().dpmo_to_sigma(dpmo)
}

/// [`SigmaCalculator::sigma_to_dpmo`] with the default shift.
pub fn sigma_to_dpmo(sigma_level: f64) -> f64 {
    SigmaCalculator::new().sigma_to_dpmo(sigma_level)
}

/// [`SigmaCalculator::sigma_to_yield`] with the default shift.
pub fn sigma_to_yield(sigma_level: f64) -> f64 {
    SigmaCalculator::new().sigma_to_yield(sigma_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sigma::benchmarks;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // calculate
    // -----------------------------------------------------------------------

    #[test]
    fn zero_defects_hits_ceiling() {
        let r = calculate(1000, 0, 10).unwrap();
        assert!((r.sigma_level - 6.0).abs() < 1e-12);
        assert!(r.meets_six_sigma());
        assert_eq!(r.dpmo, 0.0);
        assert!((r.yield_percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(r.total_opportunities, 10_000);
        assert_eq!(r.rating, SigmaRating::SixSigma);
    }

    #[test]
    fn dpmo_and_yield_from_counts() {
        // 25 defects in 500 units x 4 opportunities = 12,500 DPMO
        let r = calculate(500, 25, 4).unwrap();
        assert_eq!(r.total_opportunities, 2000);
        assert!((r.dpmo - 12_500.0).abs() < 1e-9);
        assert!((r.yield_percent - 98.75).abs() < 1e-9);
        assert!((r.defects_per_unit() - 0.05).abs() < 1e-12);
        assert!(r.sigma_level > 3.0 && r.sigma_level < 4.0);
        assert_eq!(r.rating, SigmaRating::ThreeSigma);
        assert!(!r.meets_six_sigma());
        assert_eq!(r.benchmark, SigmaRating::ThreeSigma.benchmark());
    }

    #[test]
    fn validation_messages() {
        let err = calculate(0, 1, 1).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("positive"));

        let err = calculate(10, -1, 1).unwrap_err();
        assert!(err.to_string().contains("negative"));

        let err = calculate(10, 1, 0).unwrap_err();
        assert!(err.to_string().contains("positive"));

        assert!(calculate(i64::MAX, 0, 2).is_err());
    }

    #[test]
    fn result_serializes_for_storage() {
        let r = calculate(200, 3, 5).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"rating\":\"FourSigma\""));
        let back: SigmaLevelResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rating, r.rating);
        assert_eq!(back.total_opportunities, 1000);
        assert!((back.sigma_level - r.sigma_level).abs() < 1e-12);
    }

    // -----------------------------------------------------------------------
    // dpmo_to_sigma
    // -----------------------------------------------------------------------

    #[test]
    fn dpmo_to_sigma_known_values() {
        let cases: &[(f64, f64)] = &[
            (3.4, 6.0),
            (233.0, 5.0),
            (6_210.0, 4.0),
            (66_807.0, 3.0),
            (308_537.0, 2.0),
            (690_000.0, 1.0),
        ];
        for &(dpmo, expected) in cases {
            let sigma = dpmo_to_sigma(dpmo);
            assert!(
                (sigma - expected).abs() < 0.02,
                "DPMO={dpmo}: expected sigma~{expected}, got {sigma}"
            );
        }
    }

    #[test]
    fn tiny_dpmo_stays_finite() {
        // 1 defect in 1e17 opportunities: 1 - 1e-17 is exactly 1.0 in f64
        let r = calculate(1_000_000_000, 1, 100_000_000).unwrap();
        assert!(r.sigma_level.is_finite());
        assert!(r.sigma_level > 6.0);
        assert_eq!(r.rating, SigmaRating::SixSigma);
        assert!(serde_json::to_string(&r).unwrap().contains("sigma_level"));

        let s = dpmo_to_sigma(f64::MIN_POSITIVE);
        assert!(s.is_finite() && s > 6.0);
    }

    #[test]
    fn dpmo_to_sigma_bounds() {
        assert_eq!(dpmo_to_sigma(0.0), 6.0);
        assert_eq!(dpmo_to_sigma(-5.0), 6.0);
        assert_eq!(dpmo_to_sigma(1_000_000.0), 0.0);
        assert_eq!(dpmo_to_sigma(2_000_000.0), 0.0);
    }

    #[test]
    fn dpmo_to_sigma_agrees_with_benchmark_table() {
        for b in benchmarks() {
            let sigma = dpmo_to_sigma(b.dpmo);
            assert!(
                (sigma - f64::from(b.sigma_level)).abs() < 0.2,
                "benchmark {b:?} gave {sigma}"
            );
        }
    }

    #[test]
    fn custom_shift() {
        let mut config = QualityConfig::default();
        config.sigma_shift = 0.0;
        let calc = SigmaCalculator::with_config(config);
        // Phi_inv(1 - 0.00135) = 3.0 with no shift applied
        assert!((calc.dpmo_to_sigma(1_349.9) - 3.0).abs() < 0.01);
    }

    // -----------------------------------------------------------------------
    // sigma_to_dpmo / sigma_to_yield
    // -----------------------------------------------------------------------

    #[test]
    fn sigma_to_dpmo_known_values() {
        assert_eq!(sigma_to_dpmo(6.0), 3.4);
        assert_eq!(sigma_to_dpmo(7.5), 3.4);
        assert!((sigma_to_dpmo(5.0) - 233.0).abs() < 1.0);
        assert!((sigma_to_dpmo(4.0) - 6_210.0).abs() < 5.0);
        assert!((sigma_to_dpmo(3.0) - 66_807.0).abs() < 5.0);
        assert!((sigma_to_dpmo(2.0) - 308_538.0).abs() < 5.0);
    }

    #[test]
    fn sigma_zero_dpmo() {
        // Phi(-1.5) ~ 0.0668, so DPMO ~ 933,193
        let dpmo = sigma_to_dpmo(0.0);
        assert!((dpmo - 933_193.0).abs() < 5.0, "got {dpmo}");
    }

    #[test]
    fn sigma_to_yield_values() {
        assert!((sigma_to_yield(6.0) - 99.99966).abs() < 1e-9);
        assert!((sigma_to_yield(3.0) - 93.3193).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn sigma_to_dpmo_decreases(a in 0.0_f64..5.9, b in 0.0_f64..5.9) {
            prop_assume!(a + 1e-3 < b);
            prop_assert!(sigma_to_dpmo(a) > sigma_to_dpmo(b));
        }

        #[test]
        fn roundtrip_below_six(sigma in 1.6_f64..4.5) {
            let back = dpmo_to_sigma(sigma_to_dpmo(sigma));
            prop_assert!((back - sigma).abs() < 1e-3, "sigma={}, back={}", sigma, back);
        }
    }
}
