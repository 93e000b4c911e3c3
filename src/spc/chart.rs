//! Core control chart records.
//!
//! Defines the immutable output of every chart calculation: the control
//! limits, one [`ControlChartPoint`] per plotted statistic with its rule
//! violations, and the [`ControlChartResult`] that bundles them.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The statistic a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    /// Subgroup means.
    XBar,
    /// Subgroup ranges.
    Range,
    /// Individual observations.
    Individuals,
    /// Absolute differences of consecutive observations.
    MovingRange,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::XBar => "X-bar",
            Self::Range => "R",
            Self::Individuals => "Individuals",
            Self::MovingRange => "Moving Range",
        };
        f.write_str(name)
    }
}

/// How urgently a violation calls for action.
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// A pattern worth watching.
    Warning,
    /// A likely special cause.
    Major,
    /// The process is out of control.
    Critical,
}

/// A run rule triggered at one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Western Electric rule number (1 = beyond 3-sigma limits).
    pub rule: u8,
    /// Human-readable description of the pattern.
    pub description: String,
    /// Severity of the pattern.
    pub severity: Severity,
}

/// Control limits for a chart.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Center line.
    pub cl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

impl ControlLimits {
    /// Returns `true` if `value` lies outside `[lcl, ucl]`.
    pub fn excludes(&self, value: f64) -> bool {
        value > self.ucl || value < self.lcl
    }
}

/// One plotted observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChartPoint {
    /// 1-based sample number. Moving-range points start at 2 since each
    /// covers the pair ending at that sample.
    pub sample: usize,
    /// The plotted statistic (mean, range, observation or moving range).
    pub value: f64,
    /// When the sample was taken; oldest first, the last one at the
    /// chart's anchor time.
    pub timestamp: DateTime<Utc>,
    /// Center line at this point.
    pub center_line: f64,
    /// Upper control limit at this point.
    pub upper_control_limit: f64,
    /// Lower control limit at this point.
    pub lower_control_limit: f64,
    /// Rules triggered at this point.
    pub violations: Vec<Violation>,
}

impl ControlChartPoint {
    /// Returns `true` if the value lies outside the control limits.
    pub fn is_out_of_control(&self) -> bool {
        self.value > self.upper_control_limit || self.value < self.lower_control_limit
    }

    /// Most severe violation at this point, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|v| v.severity).max()
    }
}

/// Output of a control chart calculation.
///
/// For X-bar and Individuals charts the limits are symmetric around the
/// center line. For R and MR charts the lower limit comes from a factor and
/// may sit well below the center; `center_line <= upper_control_limit`
/// holds for all chart types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChartResult {
    /// Which statistic is plotted.
    pub chart_type: ChartType,
    /// Center line.
    pub center_line: f64,
    /// Upper control limit.
    pub upper_control_limit: f64,
    /// Lower control limit.
    pub lower_control_limit: f64,
    /// Plotted points in sample order.
    pub points: Vec<ControlChartPoint>,
    /// Observations per subgroup (1 for Individuals, 2 for Moving Range).
    pub subgroup_size: usize,
    /// Number of subgroups (or observations) the chart was built from.
    pub subgroup_count: usize,
    /// Estimated process standard deviation.
    pub process_sigma: f64,
    /// Estimated process mean.
    pub process_mean: f64,
    /// Average subgroup range (or average moving range).
    pub average_range: f64,
}

impl ControlChartResult {
    /// The chart's limits as one record.
    pub fn limits(&self) -> ControlLimits {
        ControlLimits {
            ucl: self.upper_control_limit,
            cl: self.center_line,
            lcl: self.lower_control_limit,
        }
    }

    /// Returns `true` if no point triggered any rule.
    pub fn is_in_control(&self) -> bool {
        self.points.iter().all(|p| p.violations.is_empty())
    }

    /// Points lying outside the control limits.
    pub fn out_of_control_points(&self) -> impl Iterator<Item = &ControlChartPoint> {
        self.points.iter().filter(|p| p.is_out_of_control())
    }

    /// Every violation paired with the sample number it was raised at.
    pub fn violations(&self) -> Vec<(usize, &Violation)> {
        self.points
            .iter()
            .flat_map(|p| p.violations.iter().map(move |v| (p.sample, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(sample: usize, value: f64, violations: Vec<Violation>) -> ControlChartPoint {
        ControlChartPoint {
            sample,
            value,
            timestamp: DateTime::<Utc>::default(),
            center_line: 25.0,
            upper_control_limit: 30.0,
            lower_control_limit: 20.0,
            violations,
        }
    }

    fn beyond() -> Violation {
        Violation {
            rule: 1,
            description: "beyond limits".into(),
            severity: Severity::Critical,
        }
    }

    #[test]
    fn point_out_of_control_flag() {
        assert!(!point(1, 25.0, vec![]).is_out_of_control());
        assert!(!point(1, 30.0, vec![]).is_out_of_control());
        assert!(point(1, 30.01, vec![]).is_out_of_control());
        assert!(point(1, 19.99, vec![]).is_out_of_control());
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::Major);
        assert!(Severity::Major > Severity::Warning);
        let mut p = point(1, 31.0, vec![beyond()]);
        p.violations.push(Violation {
            rule: 4,
            description: "run".into(),
            severity: Severity::Warning,
        });
        assert_eq!(p.worst_severity(), Some(Severity::Critical));
        assert_eq!(point(1, 25.0, vec![]).worst_severity(), None);
    }

    #[test]
    fn result_helpers() {
        let result = ControlChartResult {
            chart_type: ChartType::Individuals,
            center_line: 25.0,
            upper_control_limit: 30.0,
            lower_control_limit: 20.0,
            points: vec![point(1, 25.0, vec![]), point(2, 35.0, vec![beyond()])],
            subgroup_size: 1,
            subgroup_count: 2,
            process_sigma: 5.0 / 3.0,
            process_mean: 25.0,
            average_range: 1.88,
        };
        assert!(!result.is_in_control());
        assert_eq!(result.out_of_control_points().count(), 1);
        let violations = result.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].0, 2);
        let limits = result.limits();
        assert!(limits.excludes(35.0));
        assert!(!limits.excludes(20.0));
    }

    #[test]
    fn chart_type_display() {
        assert_eq!(ChartType::XBar.to_string(), "X-bar");
        assert_eq!(ChartType::MovingRange.to_string(), "Moving Range");
    }
}
