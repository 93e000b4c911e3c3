//! Tunable policy constants for the quality calculators.
//!
//! The defaults reproduce the conventional Six Sigma thresholds. A caller
//! that wants different acceptance criteria (for example a Cpk threshold of
//! 1.67 for safety-critical characteristics) loads a [`QualityConfig`] from
//! TOML and hands it to the engine it uses.
//!
//! ```
//! use u_quality::QualityConfig;
//!
//! let config = QualityConfig::from_toml_str("capability_threshold = 1.67").unwrap();
//! assert!((config.capability_threshold - 1.67).abs() < 1e-12);
//! assert!((config.sigma_shift - 1.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{QualityError, Result};

/// Cpk at or above which a process counts as capable.
pub const DEFAULT_CAPABILITY_THRESHOLD: f64 = 1.33;

/// Largest |Cp - Cpk| for which a process counts as centered.
pub const DEFAULT_CENTERING_TOLERANCE: f64 = 0.1;

/// Cumulative percentage bounding the Pareto vital few.
pub const DEFAULT_VITAL_FEW_CUTOFF: f64 = 80.0;

/// Conventional long-term drift of the process mean, in sigma.
pub const DEFAULT_SIGMA_SHIFT: f64 = 1.5;

/// Spacing between consecutive control-chart timestamps.
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 60;

/// Longest accepted spacing between control-chart timestamps (one year).
pub const MAX_SAMPLE_INTERVAL_SECS: u64 = 366 * 24 * 60 * 60;

/// Acceptance thresholds and conventions shared by the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum Cpk for [`CapabilityResult::is_capable`](crate::capability::CapabilityResult::is_capable).
    pub capability_threshold: f64,

    /// Maximum |Cp - Cpk| for [`CapabilityResult::is_centered`](crate::capability::CapabilityResult::is_centered).
    pub centering_tolerance: f64,

    /// Cumulative percentage (0, 100] up to which Pareto items are vital.
    pub vital_few_cutoff: f64,

    /// Long-term mean shift added when converting DPMO to a sigma level.
    pub sigma_shift: f64,

    /// Seconds between consecutive control-chart points.
    ///
    /// The most recent point is stamped with the chart's anchor time and
    /// earlier points step back by this interval.
    pub sample_interval_secs: u64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            capability_threshold: DEFAULT_CAPABILITY_THRESHOLD,
            centering_tolerance: DEFAULT_CENTERING_TOLERANCE,
            vital_few_cutoff: DEFAULT_VITAL_FEW_CUTOFF,
            sigma_shift: DEFAULT_SIGMA_SHIFT,
            sample_interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
        }
    }
}

impl QualityConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`QualityError::InvalidInput`] if the document does not parse or a
    /// value fails [`validate`](Self::validate).
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| QualityError::invalid(format!("malformed quality config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.capability_threshold.is_finite() && self.capability_threshold > 0.0) {
            return Err(QualityError::invalid(
                "capability_threshold must be positive and finite",
            ));
        }
        if !(self.centering_tolerance.is_finite() && self.centering_tolerance > 0.0) {
            return Err(QualityError::invalid(
                "centering_tolerance must be positive and finite",
            ));
        }
        if !(self.vital_few_cutoff > 0.0 && self.vital_few_cutoff <= 100.0) {
            return Err(QualityError::invalid(
                "vital_few_cutoff must be greater than 0 and at most 100",
            ));
        }
        if !(self.sigma_shift.is_finite() && self.sigma_shift >= 0.0) {
            return Err(QualityError::invalid(
                "sigma_shift must not be negative",
            ));
        }
        if self.sample_interval_secs == 0 {
            return Err(QualityError::invalid(
                "sample_interval_secs must be positive",
            ));
        }
        if self.sample_interval_secs > MAX_SAMPLE_INTERVAL_SECS {
            return Err(QualityError::invalid(format!(
                "sample_interval_secs must be at most {MAX_SAMPLE_INTERVAL_SECS}, got {}",
                self.sample_interval_secs
            )));
        }
        Ok(())
    }
}
