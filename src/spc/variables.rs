//! Variables control charts: X-bar, R, Individuals, and Moving Range.
//!
//! Subgroup charts (X-bar, R) track the mean and within-subgroup range of
//! small samples of size 2..=10; the Individuals and Moving Range charts
//! handle single observations.
//!
//! # Control Chart Factors
//!
//! A2, D3, D4 and d2 come from [`crate::stats::constants`]. The
//! moving-range charts use the n = 2 factors d2 = 1.128 and D4 = 3.267.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Shewhart, W.A. (1931). *Economic Control of Quality of Manufactured Product*.

use chrono::{DateTime, TimeDelta, Utc};

use super::chart::{ChartType, ControlChartPoint, ControlChartResult, ControlLimits};
use super::rules::{western_electric_rules, BeyondLimits, RunRule};
use super::subgroup::SubgroupSet;
use crate::config::QualityConfig;
use crate::error::{ensure_finite, QualityError, Result};
use crate::stats;

/// d2 for a moving range of two consecutive observations.
const D2_MR: f64 = 1.128;

/// D4 for a moving range of two consecutive observations.
const D4_MR: f64 = 3.267;

/// Builds control charts and applies run rules to their points.
///
/// Stateless between calls: every method validates its input and returns
/// a fresh [`ControlChartResult`].
///
/// # Examples
///
/// ```
/// use u_quality::spc::ControlChartEngine;
///
/// let engine = ControlChartEngine::new();
/// let chart = engine
///     .xbar_chart(&[
///         [25.0, 26.0, 24.5, 25.5, 25.0],
///         [25.2, 24.8, 25.1, 24.9, 25.3],
///         [25.1, 25.0, 24.7, 25.3, 24.9],
///     ])
///     .unwrap();
/// assert_eq!(chart.points.len(), 3);
/// assert!(chart.upper_control_limit > chart.center_line);
/// assert!(chart.center_line > chart.lower_control_limit);
/// ```
pub struct ControlChartEngine {
    config: QualityConfig,
    rules: Vec<Box<dyn RunRule>>,
    anchor: Option<DateTime<Utc>>,
}

impl Default for ControlChartEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlChartEngine {
    /// Engine with default configuration that applies only Rule 1.
    pub fn new() -> Self {
        Self {
            config: QualityConfig::default(),
            rules: vec![Box::new(BeyondLimits)],
            anchor: None,
        }
    }

    /// Engine that applies all four Western Electric rules.
    pub fn western_electric() -> Self {
        Self::new().with_rules(western_electric_rules())
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: QualityConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the rule set.
    pub fn with_rules(mut self, rules: Vec<Box<dyn RunRule>>) -> Self {
        self.rules = rules;
        self
    }

    /// Adds one rule to the current set.
    pub fn add_rule(mut self, rule: impl RunRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Stamps the most recent point with `anchor` instead of the current time.
    pub fn anchored_at(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// X-bar chart of subgroup means.
    ///
    /// CL = X-double-bar, UCL/LCL = CL +/- A2 * R-bar, sigma-hat = R-bar / d2.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if there is not at least one subgroup, subgroups are not
    /// all the same size, the size lies outside 2..=10, or a value is not finite.
    pub fn xbar_chart<S: AsRef<[f64]>>(&self, subgroups: &[S]) -> Result<ControlChartResult> {
        self.xbar_chart_from_set(&SubgroupSet::new(subgroups)?)
    }

    /// X-bar chart of an already validated [`SubgroupSet`].
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the point timestamps fall outside the representable
    /// date range.
    pub fn xbar_chart_from_set(&self, set: &SubgroupSet) -> Result<ControlChartResult> {
        let summary = SubgroupSummary::from_set(set)?;
        let a2 = stats::a2(summary.size)?;
        let limits = ControlLimits {
            ucl: summary.grand_mean + a2 * summary.r_bar,
            cl: summary.grand_mean,
            lcl: summary.grand_mean - a2 * summary.r_bar,
        };
        let points = self.build_points(&summary.means, 1, &limits)?;
        Ok(self.finish(ChartType::XBar, limits, points, &summary))
    }

    /// R chart of subgroup ranges.
    ///
    /// CL = R-bar, UCL = D4 * R-bar, LCL = D3 * R-bar (zero for n <= 6).
    ///
    /// # Errors
    ///
    /// Same conditions as [`xbar_chart`](Self::xbar_chart).
    pub fn r_chart<S: AsRef<[f64]>>(&self, subgroups: &[S]) -> Result<ControlChartResult> {
        self.r_chart_from_set(&SubgroupSet::new(subgroups)?)
    }

    /// R chart of an already validated [`SubgroupSet`].
    ///
    /// # Errors
    ///
    /// Same timestamp condition as [`xbar_chart_from_set`](Self::xbar_chart_from_set).
    pub fn r_chart_from_set(&self, set: &SubgroupSet) -> Result<ControlChartResult> {
        let summary = SubgroupSummary::from_set(set)?;
        let factors = stats::chart_constants(summary.size)?;
        let limits = ControlLimits {
            ucl: factors.d4 * summary.r_bar,
            cl: summary.r_bar,
            lcl: factors.d3_lower * summary.r_bar,
        };
        let points = self.build_points(&summary.ranges, 1, &limits)?;
        Ok(self.finish(ChartType::Range, limits, points, &summary))
    }

    /// Individuals chart of single observations.
    ///
    /// CL = mean, sigma-hat = MR-bar / 1.128, UCL/LCL = CL +/- 3 sigma-hat.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if fewer than 2 values are given or a value is not finite.
    pub fn individuals_chart(&self, values: &[f64]) -> Result<ControlChartResult> {
        let summary = IndividualsSummary::new(values, ChartType::Individuals)?;
        let limits = ControlLimits {
            ucl: summary.mean + 3.0 * summary.sigma,
            cl: summary.mean,
            lcl: summary.mean - 3.0 * summary.sigma,
        };
        let points = self.build_points(values, 1, &limits)?;
        let result = ControlChartResult {
            chart_type: ChartType::Individuals,
            center_line: limits.cl,
            upper_control_limit: limits.ucl,
            lower_control_limit: limits.lcl,
            points,
            subgroup_size: 1,
            subgroup_count: values.len(),
            process_sigma: summary.sigma,
            process_mean: summary.mean,
            average_range: summary.mr_bar,
        };
        log_chart(&result);
        Ok(result)
    }

    /// Moving Range chart of |x_i - x_{i-1}|.
    ///
    /// Produces `n - 1` points numbered from 2. CL = MR-bar,
    /// UCL = 3.267 * MR-bar, LCL = 0.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if fewer than 2 values are given or a value is not finite.
    pub fn moving_range_chart(&self, values: &[f64]) -> Result<ControlChartResult> {
        let summary = IndividualsSummary::new(values, ChartType::MovingRange)?;
        let limits = ControlLimits {
            ucl: D4_MR * summary.mr_bar,
            cl: summary.mr_bar,
            lcl: 0.0,
        };
        let ranges: Vec<f64> = stats::moving_range(values).collect();
        let points = self.build_points(&ranges, 2, &limits)?;
        let result = ControlChartResult {
            chart_type: ChartType::MovingRange,
            center_line: limits.cl,
            upper_control_limit: limits.ucl,
            lower_control_limit: limits.lcl,
            points,
            subgroup_size: 2,
            subgroup_count: values.len(),
            process_sigma: summary.sigma,
            process_mean: summary.mean,
            average_range: summary.mr_bar,
        };
        log_chart(&result);
        Ok(result)
    }

    /// Builds points numbered from `first_sample`, oldest first, then runs
    /// every rule over them.
    fn build_points(
        &self,
        values: &[f64],
        first_sample: usize,
        limits: &ControlLimits,
    ) -> Result<Vec<ControlChartPoint>> {
        let anchor = self.anchor.unwrap_or_else(Utc::now);
        let last = values.len().saturating_sub(1);

        let mut points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| -> Result<ControlChartPoint> {
                Ok(ControlChartPoint {
                    sample: first_sample + i,
                    value,
                    timestamp: self.timestamp_before(anchor, last - i)?,
                    center_line: limits.cl,
                    upper_control_limit: limits.ucl,
                    lower_control_limit: limits.lcl,
                    violations: Vec::new(),
                })
            })
            .collect::<Result<Vec<ControlChartPoint>>>()?;

        for rule in &self.rules {
            for (pos, violation) in rule.check(&points, limits) {
                if let Some(point) = points.get_mut(pos) {
                    point.violations.push(violation);
                }
            }
        }
        Ok(points)
    }

    /// `anchor` moved back by `steps` sample intervals.
    fn timestamp_before(&self, anchor: DateTime<Utc>, steps: usize) -> Result<DateTime<Utc>> {
        let out_of_range = || {
            QualityError::invalid(format!(
                "chart timestamps out of range: {steps} intervals of {}s before {anchor}",
                self.config.sample_interval_secs
            ))
        };
        let step = i64::try_from(self.config.sample_interval_secs).map_err(|_| out_of_range())?;
        let steps = i64::try_from(steps).map_err(|_| out_of_range())?;
        let offset = step
            .checked_mul(steps)
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(out_of_range)?;
        anchor.checked_sub_signed(offset).ok_or_else(out_of_range)
    }

    fn finish(
        &self,
        chart_type: ChartType,
        limits: ControlLimits,
        points: Vec<ControlChartPoint>,
        summary: &SubgroupSummary,
    ) -> ControlChartResult {
        let result = ControlChartResult {
            chart_type,
            center_line: limits.cl,
            upper_control_limit: limits.ucl,
            lower_control_limit: limits.lcl,
            points,
            subgroup_size: summary.size,
            subgroup_count: summary.means.len(),
            process_sigma: summary.sigma,
            process_mean: summary.grand_mean,
            average_range: summary.r_bar,
        };
        log_chart(&result);
        result
    }
}

/// X-bar chart with the default engine. See [`ControlChartEngine::xbar_chart`].
pub fn xbar_chart<S: AsRef<[f64]>>(subgroups: &[S]) -> Result<ControlChartResult> {
    ControlChartEngine::new().xbar_chart(subgroups)
}

/// X-bar chart of a validated set with the default engine.
pub fn xbar_chart_from_set(set: &SubgroupSet) -> Result<ControlChartResult> {
    ControlChartEngine::new().xbar_chart_from_set(set)
}

/// R chart of a validated set with the default engine.
pub fn r_chart_from_set(set: &SubgroupSet) -> Result<ControlChartResult> {
    ControlChartEngine::new().r_chart_from_set(set)
}

/// R chart with the default engine. See [`ControlChartEngine::r_chart`].
pub fn r_chart<S: AsRef<[f64]>>(subgroups: &[S]) -> Result<ControlChartResult> {
    ControlChartEngine::new().r_chart(subgroups)
}

/// Individuals chart with the default engine.
/// See [`ControlChartEngine::individuals_chart`].
pub fn individuals_chart(values: &[f64]) -> Result<ControlChartResult> {
    ControlChartEngine::new().individuals_chart(values)
}

/// Moving Range chart with the default engine.
/// See [`ControlChartEngine::moving_range_chart`].
pub fn moving_range_chart(values: &[f64]) -> Result<ControlChartResult> {
    ControlChartEngine::new().moving_range_chart(values)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Per-subgroup means and ranges with their averages.
struct SubgroupSummary {
    size: usize,
    means: Vec<f64>,
    ranges: Vec<f64>,
    grand_mean: f64,
    r_bar: f64,
    sigma: f64,
}

impl SubgroupSummary {
    fn from_set(set: &SubgroupSet) -> Result<Self> {
        let mut means = Vec::with_capacity(set.len());
        let mut ranges = Vec::with_capacity(set.len());
        for subgroup in set.iter() {
            means.push(stats::mean(subgroup)?);
            ranges.push(stats::range(subgroup)?);
        }
        let grand_mean = stats::mean(&means)?;
        let r_bar = stats::mean(&ranges)?;
        let sigma = stats::estimate_sigma_from_range(r_bar, set.subgroup_size())?;
        Ok(Self {
            size: set.subgroup_size(),
            means,
            ranges,
            grand_mean,
            r_bar,
            sigma,
        })
    }
}

struct IndividualsSummary {
    mean: f64,
    mr_bar: f64,
    sigma: f64,
}

impl IndividualsSummary {
    fn new(values: &[f64], chart_type: ChartType) -> Result<Self> {
        if values.len() < 2 {
            tracing::trace!(%chart_type, count = values.len(), "rejected chart input");
            return Err(QualityError::invalid(format!(
                "{chart_type} chart requires at least 2 values, got {}",
                values.len()
            )));
        }
        ensure_finite(values, "values")?;
        let mean = stats::mean(values)?;
        let mr_bar = stats::average_moving_range(values);
        Ok(Self {
            mean,
            mr_bar,
            sigma: mr_bar / D2_MR,
        })
    }
}

fn log_chart(result: &ControlChartResult) {
    tracing::debug!(
        chart_type = %result.chart_type,
        points = result.points.len(),
        cl = result.center_line,
        ucl = result.upper_control_limit,
        lcl = result.lower_control_limit,
        out_of_control = result.out_of_control_points().count(),
        "computed control chart"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::{EightOnOneSide, Severity};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn anchored() -> ControlChartEngine {
        ControlChartEngine::new().anchored_at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    const MONTGOMERY: [[f64; 4]; 5] = [
        [72.0, 84.0, 79.0, 49.0],
        [56.0, 87.0, 33.0, 42.0],
        [55.0, 73.0, 22.0, 60.0],
        [44.0, 80.0, 54.0, 74.0],
        [97.0, 26.0, 48.0, 58.0],
    ];

    // --- X-bar ---

    #[test]
    fn xbar_basic_limits() {
        let chart = xbar_chart(&MONTGOMERY).unwrap();
        let expected_grand_mean = (71.0 + 54.5 + 52.5 + 63.0 + 57.25) / 5.0;
        assert!((chart.center_line - expected_grand_mean).abs() < 1e-10);
        assert!((chart.process_mean - chart.center_line).abs() < f64::EPSILON);
        assert!(chart.upper_control_limit > chart.center_line);
        assert!(chart.center_line > chart.lower_control_limit);
        assert_eq!(chart.subgroup_size, 4);
        assert_eq!(chart.subgroup_count, 5);
        assert_eq!(chart.points.len(), 5);
    }

    #[test]
    fn xbar_factors_n5() {
        // mean = 50, range = 10: UCL = 50 + 0.577 * 10, sigma = 10 / 2.326
        let chart = xbar_chart(&[[45.0, 47.0, 50.0, 53.0, 55.0]]).unwrap();
        assert!((chart.center_line - 50.0).abs() < f64::EPSILON);
        assert!((chart.upper_control_limit - 55.77).abs() < 1e-9);
        assert!((chart.lower_control_limit - 44.23).abs() < 1e-9);
        assert!((chart.average_range - 10.0).abs() < f64::EPSILON);
        assert!((chart.process_sigma - 10.0 / 2.326).abs() < 1e-12);
    }

    #[test]
    fn xbar_constant_subgroups_collapse_limits() {
        let chart = xbar_chart(&[[10.0, 10.0, 10.0], [10.0, 10.0, 10.0]]).unwrap();
        assert!((chart.upper_control_limit - 10.0).abs() < f64::EPSILON);
        assert!((chart.lower_control_limit - 10.0).abs() < f64::EPSILON);
        assert!(chart.is_in_control());
    }

    #[test]
    fn xbar_detects_out_of_control() {
        let mut data = vec![[10.0, 10.5, 9.5]; 5];
        data.push([50.0, 51.0, 49.0]);
        let chart = xbar_chart(&data).unwrap();
        assert!(!chart.is_in_control());
        let last = chart.points.last().unwrap();
        assert!(last.is_out_of_control());
        assert_eq!(last.violations.len(), 1);
        assert_eq!(last.violations[0].rule, 1);
        assert_eq!(last.violations[0].severity, Severity::Critical);
    }

    #[test]
    fn xbar_validation_messages() {
        let empty: [[f64; 3]; 0] = [];
        assert!(xbar_chart(&empty).unwrap_err().to_string().contains("at least one"));

        let mixed = [vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        assert!(xbar_chart(&mixed).unwrap_err().to_string().contains("same size"));

        let too_big = [[0.0; 11]];
        let err = xbar_chart(&too_big).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("between 2 and 10"));
    }

    #[test]
    fn points_are_numbered_and_timestamped_oldest_first() {
        let engine = anchored();
        let chart = engine.xbar_chart(&MONTGOMERY).unwrap();
        let samples: Vec<usize> = chart.points.iter().map(|p| p.sample).collect();
        assert_eq!(samples, vec![1, 2, 3, 4, 5]);

        let anchor = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(chart.points[4].timestamp, anchor);
        assert_eq!(chart.points[0].timestamp, anchor - TimeDelta::seconds(240));
        for w in chart.points.windows(2) {
            assert!(w[0].timestamp < w[1].timestamp);
        }
    }

    #[test]
    fn sample_interval_comes_from_config() {
        let mut config = QualityConfig::default();
        config.sample_interval_secs = 3600;
        let chart = anchored()
            .with_config(config)
            .individuals_chart(&[1.0, 2.0, 3.0])
            .unwrap();
        let gap = chart.points[1].timestamp - chart.points[0].timestamp;
        assert_eq!(gap, TimeDelta::seconds(3600));
    }

    #[test]
    fn oversized_interval_is_rejected_not_panicking() {
        let mut config = QualityConfig::default();
        config.sample_interval_secs = 10_000_000_000_000_000;
        let err = anchored()
            .with_config(config)
            .individuals_chart(&[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn anchor_at_earliest_date_is_rejected() {
        let err = ControlChartEngine::new()
            .anchored_at(DateTime::<Utc>::MIN_UTC)
            .individuals_chart(&[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(err.is_invalid_input());

        // a single point needs no step back
        let chart = ControlChartEngine::new()
            .anchored_at(DateTime::<Utc>::MIN_UTC)
            .xbar_chart(&[[1.0, 2.0]])
            .unwrap();
        assert_eq!(chart.points[0].timestamp, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn validated_set_feeds_both_subgroup_charts() {
        let set = SubgroupSet::new(&MONTGOMERY).unwrap();
        let xbar = xbar_chart_from_set(&set).unwrap();
        let r = r_chart_from_set(&set).unwrap();
        assert_eq!(xbar.center_line, xbar_chart(&MONTGOMERY).unwrap().center_line);
        assert_eq!(r.center_line, r_chart(&MONTGOMERY).unwrap().center_line);
        assert_eq!(r.subgroup_count, 5);
    }

    // --- R ---

    #[test]
    fn r_chart_limits_n5() {
        let data = [
            [10.0, 12.0, 11.0, 13.0, 14.0],
            [11.0, 13.0, 12.0, 10.0, 15.0],
            [12.0, 11.0, 14.0, 13.0, 10.0],
        ];
        let chart = r_chart(&data).unwrap();
        // ranges 4, 5, 4
        let r_bar = 13.0 / 3.0;
        assert!((chart.center_line - r_bar).abs() < 1e-12);
        assert!((chart.upper_control_limit - 2.114 * r_bar).abs() < 1e-12);
        assert_eq!(chart.lower_control_limit, 0.0);
        assert_eq!(chart.chart_type, ChartType::Range);
    }

    #[test]
    fn r_chart_positive_lcl_above_six() {
        let data = [[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]; 3];
        let chart = r_chart(&data).unwrap();
        assert!((chart.lower_control_limit - 0.136 * 7.0).abs() < 1e-12);
        assert!(chart.lower_control_limit < chart.center_line);
    }

    #[test]
    fn r_chart_shares_validation() {
        let mixed = [vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        assert!(r_chart(&mixed).unwrap_err().to_string().contains("same size"));
    }

    // --- Individuals ---

    #[test]
    fn individuals_uses_mr_bar_over_1128() {
        // mean = 100, MR-bar = 10, sigma = 10 / 1.128
        let chart = individuals_chart(&[95.0, 105.0]).unwrap();
        let sigma = 10.0 / 1.128;
        assert!((chart.center_line - 100.0).abs() < f64::EPSILON);
        assert!((chart.upper_control_limit - (100.0 + 3.0 * sigma)).abs() < 1e-10);
        assert!((chart.lower_control_limit - (100.0 - 3.0 * sigma)).abs() < 1e-10);
        assert!((chart.process_sigma - sigma).abs() < 1e-12);
        assert_eq!(chart.subgroup_size, 1);
    }

    #[test]
    fn individuals_requires_two_values() {
        let err = individuals_chart(&[10.0]).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
        assert!(individuals_chart(&[]).is_err());
        assert!(individuals_chart(&[1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn individuals_detects_outlier() {
        let mut data: Vec<f64> = (0..10).map(|i| 50.0 + (i % 3) as f64 * 0.5).collect();
        data.push(100.0);
        let chart = individuals_chart(&data).unwrap();
        assert!(!chart.is_in_control());
        assert_eq!(chart.out_of_control_points().last().unwrap().sample, 11);
    }

    // --- Moving Range ---

    #[test]
    fn moving_range_points_start_at_two() {
        let chart = moving_range_chart(&[10.0, 12.0, 9.0]).unwrap();
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].sample, 2);
        assert_eq!(chart.points[1].sample, 3);
        assert!((chart.points[0].value - 2.0).abs() < f64::EPSILON);
        assert!((chart.points[1].value - 3.0).abs() < f64::EPSILON);
        assert!((chart.center_line - 2.5).abs() < f64::EPSILON);
        assert!((chart.upper_control_limit - 3.267 * 2.5).abs() < 1e-12);
        assert_eq!(chart.lower_control_limit, 0.0);
    }

    #[test]
    fn moving_range_requires_two_values() {
        let err = moving_range_chart(&[1.0]).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    // --- Rules ---

    #[test]
    fn default_engine_applies_only_rule_one() {
        // nine points above center but inside limits
        let mut data = vec![9.0, 11.0, 9.0, 11.0];
        data.extend([10.5; 9]);
        let chart = ControlChartEngine::new().individuals_chart(&data).unwrap();
        assert!(chart.is_in_control());
        let chart = ControlChartEngine::new()
            .add_rule(EightOnOneSide)
            .individuals_chart(&data)
            .unwrap();
        assert!(!chart.is_in_control());
        assert!(chart.violations().iter().all(|(_, v)| v.rule == 4));
    }

    #[test]
    fn western_electric_engine_keeps_point_shape() {
        let data = [10.0, 10.2, 9.8, 10.1, 9.9, 10.0, 25.0];
        let chart = ControlChartEngine::western_electric()
            .individuals_chart(&data)
            .unwrap();
        let worst = chart.points.iter().filter_map(|p| p.worst_severity()).max();
        assert!(worst.is_some());
    }

    proptest! {
        #[test]
        fn xbar_point_count_and_center(
            size in 2_usize..=10,
            data in proptest::collection::vec(-1e3_f64..1e3, 20..200),
        ) {
            let subgroups: Vec<Vec<f64>> = data.chunks_exact(size).map(<[f64]>::to_vec).collect();
            prop_assume!(!subgroups.is_empty());
            let chart = xbar_chart(&subgroups).unwrap();
            prop_assert_eq!(chart.points.len(), subgroups.len());
            let means: Vec<f64> = subgroups.iter().map(|s| stats::mean(s).unwrap()).collect();
            let grand = stats::mean(&means).unwrap();
            prop_assert!((chart.center_line - grand).abs() < 1e-9);
            prop_assert!((chart.process_mean - chart.center_line).abs() < f64::EPSILON);
            prop_assert!(chart.lower_control_limit <= chart.center_line);
            prop_assert!(chart.center_line <= chart.upper_control_limit);
        }

        #[test]
        fn moving_range_chart_shape(data in proptest::collection::vec(-1e3_f64..1e3, 2..200)) {
            let chart = moving_range_chart(&data).unwrap();
            prop_assert_eq!(chart.points.len(), data.len() - 1);
            prop_assert_eq!(chart.lower_control_limit, 0.0);
            prop_assert!(chart.center_line <= chart.upper_control_limit);
        }
    }
}
