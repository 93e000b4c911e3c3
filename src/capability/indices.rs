//! Process capability indices (Cp, Cpk, Pp, Ppk, Cpm).
//!
//! Capability indices quantify how well a process output fits within its
//! specification limits. Pp/Ppk are computed from the same sample standard
//! deviation as Cp/Cpk; no within-subgroup versus overall split is made, so
//! `pp == cp` and `ppk == cpk` always.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.
//! - Chan, Cheng & Spiring (1988), "A New Measure of Process Capability: Cpm",
//!   *Journal of Quality Technology* 20(3), pp. 162--175.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::QualityConfig;
use crate::error::{ensure_finite, QualityError, Result};
use crate::special::standard_normal_cdf;
use crate::stats;

/// Two-sided specification for a capability study.
///
/// # Examples
///
/// ```
/// use u_quality::capability::CapabilityAnalysis;
///
/// let spec = CapabilityAnalysis::new(9.0, 11.0).unwrap();
/// let data = [9.5, 10.0, 10.2, 9.8, 10.1, 10.3, 9.9, 10.0];
/// let result = spec.compute(&data).unwrap();
/// assert!(result.cp > 0.0);
/// assert!((result.target - 10.0).abs() < 1e-12);
///
/// assert!(CapabilityAnalysis::new(11.0, 9.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CapabilityAnalysis {
    lsl: f64,
    usl: f64,
    target: Option<f64>,
    config: QualityConfig,
}

/// Interpretation of Cpk on a six-step ladder.
///
/// Ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapabilityRating {
    /// Cpk < 0.67.
    Inadequate,
    /// 0.67 <= Cpk < 1.0.
    Poor,
    /// 1.0 <= Cpk < 1.33.
    Marginal,
    /// 1.33 <= Cpk < 1.67.
    Good,
    /// 1.67 <= Cpk < 2.0.
    Excellent,
    /// Cpk >= 2.0.
    WorldClass,
}

impl CapabilityRating {
    /// Rates a Cpk value. `NaN` rates as `Inadequate`.
    pub fn from_cpk(cpk: f64) -> Self {
        match cpk {
            c if c >= 2.0 => Self::WorldClass,
            c if c >= 1.67 => Self::Excellent,
            c if c >= 1.33 => Self::Good,
            c if c >= 1.0 => Self::Marginal,
            c if c >= 0.67 => Self::Poor,
            _ => Self::Inadequate,
        }
    }

    /// One-line interpretation.
    pub fn description(&self) -> &'static str {
        match self {
            Self::WorldClass => "World class: six sigma capable",
            Self::Excellent => "Excellent: five sigma capable",
            Self::Good => "Good: process is capable",
            Self::Marginal => "Marginal: tight control required",
            Self::Poor => "Poor: process improvement required",
            Self::Inadequate => "Inadequate: process is not capable",
        }
    }
}

impl fmt::Display for CapabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Output of a capability study.
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cpk | >= 1.33 | Process is capable |
/// | Cp - Cpk | < 0.1 | Process is centered |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityResult {
    /// Cp = (USL - LSL) / (6 * sigma).
    pub cp: f64,
    /// Cpk = min(Cpu, Cpl).
    pub cpk: f64,
    /// Cpu = (USL - mean) / (3 * sigma).
    pub cpu: f64,
    /// Cpl = (mean - LSL) / (3 * sigma).
    pub cpl: f64,
    /// Same value as `cp`.
    pub pp: f64,
    /// Same value as `cpk`.
    pub ppk: f64,
    /// Cpm = Cp / sqrt(1 + ((mean - target) / sigma)^2).
    pub cpm: f64,
    /// Lower specification limit.
    pub lsl: f64,
    /// Upper specification limit.
    pub usl: f64,
    /// Target value; the midpoint of the limits unless given.
    pub target: f64,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Number of measurements.
    pub sample_size: usize,
    /// Smallest measurement.
    pub min: f64,
    /// Largest measurement.
    pub max: f64,
    /// Estimated percentage of output below the LSL.
    pub percent_below_lsl: f64,
    /// Estimated percentage of output above the USL.
    pub percent_above_usl: f64,
    /// Rating of `cpk`.
    pub rating: CapabilityRating,
    capable: bool,
    centered: bool,
}

impl CapabilityResult {
    /// Returns `true` if Cpk meets the configured capability threshold.
    pub fn is_capable(&self) -> bool {
        self.capable
    }

    /// Returns `true` if |Cp - Cpk| is below the configured tolerance.
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Estimated total percentage outside the specification.
    pub fn percent_out_of_spec(&self) -> f64 {
        self.percent_below_lsl + self.percent_above_usl
    }

    /// Estimated parts per million below the LSL.
    pub fn ppm_below_lsl(&self) -> f64 {
        self.percent_below_lsl * 10_000.0
    }

    /// Estimated parts per million above the USL.
    pub fn ppm_above_usl(&self) -> f64 {
        self.percent_above_usl * 10_000.0
    }
}

impl CapabilityAnalysis {
    /// Creates a two-sided specification.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a limit is not finite or `usl` is not greater than `lsl`.
    pub fn new(lsl: f64, usl: f64) -> Result<Self> {
        if !lsl.is_finite() || !usl.is_finite() {
            return Err(QualityError::invalid(
                "specification limits must be finite",
            ));
        }
        if usl <= lsl {
            return Err(QualityError::invalid(format!(
                "USL ({usl}) must be greater than LSL ({lsl})"
            )));
        }
        Ok(Self {
            lsl,
            usl,
            target: None,
            config: QualityConfig::default(),
        })
    }

    /// Sets the target used for Cpm. Defaults to `(LSL + USL) / 2`.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Replaces the capability and centering thresholds.
    pub fn with_config(mut self, config: QualityConfig) -> Self {
        self.config = config;
        self
    }

    /// Computes every index from `values`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if fewer than 2 values are given, a value or the
    /// target is not finite, or the sample standard deviation is zero.
    pub fn compute(&self, values: &[f64]) -> Result<CapabilityResult> {
        if values.len() < 2 {
            tracing::trace!(count = values.len(), "rejected capability input");
            return Err(QualityError::invalid(format!(
                "capability analysis requires at least 2 values, got {}",
                values.len()
            )));
        }
        ensure_finite(values, "values")?;
        let target = self.target.unwrap_or((self.lsl + self.usl) / 2.0);
        if !target.is_finite() {
            return Err(QualityError::invalid("target must be finite"));
        }

        let mean = stats::mean(values)?;
        let std_dev = stats::std_dev(values)?;
        let cp = cp(std_dev, self.lsl, self.usl)?;
        let cpk = cpk(mean, std_dev, self.lsl, self.usl)?;
        let cpu = (self.usl - mean) / (3.0 * std_dev);
        let cpl = (mean - self.lsl) / (3.0 * std_dev);
        let deviation_ratio = (mean - target) / std_dev;
        let cpm = cp / (1.0 + deviation_ratio * deviation_ratio).sqrt();

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });

        let z_lower = (self.lsl - mean) / std_dev;
        let z_upper = (self.usl - mean) / std_dev;
        let percent_below_lsl = standard_normal_cdf(z_lower) * 100.0;
        let percent_above_usl = (1.0 - standard_normal_cdf(z_upper)) * 100.0;

        let result = CapabilityResult {
            cp,
            cpk,
            cpu,
            cpl,
            pp: cp,
            ppk: cpk,
            cpm,
            lsl: self.lsl,
            usl: self.usl,
            target,
            mean,
            std_dev,
            sample_size: values.len(),
            min,
            max,
            percent_below_lsl,
            percent_above_usl,
            rating: CapabilityRating::from_cpk(cpk),
            capable: cpk >= self.config.capability_threshold,
            centered: (cp - cpk).abs() < self.config.centering_tolerance,
        };
        tracing::debug!(
            n = result.sample_size,
            cp = result.cp,
            cpk = result.cpk,
            rating = ?result.rating,
            "computed process capability"
        );
        Ok(result)
    }
}

/// Capability study with default thresholds.
///
/// `target` defaults to the midpoint of the limits.
///
/// # Errors
///
/// `InvalidInput` if fewer than 2 values are given, `usl <= lsl`, a value
/// is not finite, or all values are identical (zero standard deviation).
pub fn calculate(values: &[f64], lsl: f64, usl: f64, target: Option<f64>) -> Result<CapabilityResult> {
    let analysis = CapabilityAnalysis::new(lsl, usl)?;
    match target {
        Some(t) => analysis.with_target(t).compute(values),
        None => analysis.compute(values),
    }
}

/// Cp = (USL - LSL) / (6 * std_dev).
///
/// # Errors
///
/// `InvalidInput` unless `std_dev` is positive and finite.
pub fn cp(std_dev: f64, lsl: f64, usl: f64) -> Result<f64> {
    ensure_positive_sigma(std_dev)?;
    Ok((usl - lsl) / (6.0 * std_dev))
}

/// Cpk = min((USL - mean) / (3 * std_dev), (mean - LSL) / (3 * std_dev)).
///
/// # Errors
///
/// `InvalidInput` unless `std_dev` is positive and finite.
///
/// # Examples
///
/// ```
/// use u_quality::capability::cpk;
/// let v = cpk(5.0, 0.5, 4.0, 6.0).unwrap();
/// assert!((v - 0.667).abs() < 0.001);
/// assert!(cpk(5.0, 0.0, 4.0, 6.0).is_err());
/// ```
pub fn cpk(mean: f64, std_dev: f64, lsl: f64, usl: f64) -> Result<f64> {
    ensure_positive_sigma(std_dev)?;
    let cpu = (usl - mean) / (3.0 * std_dev);
    let cpl = (mean - lsl) / (3.0 * std_dev);
    Ok(cpu.min(cpl))
}

fn ensure_positive_sigma(std_dev: f64) -> Result<()> {
    if std_dev.is_finite() && std_dev > 0.0 {
        Ok(())
    } else {
        Err(QualityError::invalid(format!(
            "standard deviation must be positive, got {std_dev}"
        )))
    }
}
