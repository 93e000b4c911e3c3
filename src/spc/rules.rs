//! Run rules for detecting special causes on a control chart.
//!
//! Only [`BeyondLimits`] (Western Electric Rule 1) is applied by default.
//! The zone rules below can be added to a
//! [`ControlChartEngine`](super::ControlChartEngine) without changing the
//! shape of a [`ControlChartPoint`]: each rule just appends
//! [`Violation`] records to the points it flags.
//!
//! Zone widths are derived from the limits as `(UCL - CL) / 3`.
//!
//! # References
//!
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use super::chart::{ControlChartPoint, ControlLimits, Severity, Violation};

/// A test for non-random patterns on a chart.
pub trait RunRule: Send + Sync {
    /// Returns `(position, violation)` pairs, where `position` indexes
    /// into `points`. A rule may flag the same position more than once.
    fn check(&self, points: &[ControlChartPoint], limits: &ControlLimits)
        -> Vec<(usize, Violation)>;
}

/// Rule 1: a single point beyond the 3-sigma control limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeyondLimits;

/// Rule 2: 2 of 3 consecutive points beyond 2 sigma on the same side.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOfThreeBeyondTwoSigma;

/// Rule 3: 4 of 5 consecutive points beyond 1 sigma on the same side.
#[derive(Debug, Clone, Copy, Default)]
pub struct FourOfFiveBeyondOneSigma;

/// Rule 4: 8 consecutive points on the same side of the center line.
#[derive(Debug, Clone, Copy, Default)]
pub struct EightOnOneSide;

/// The four Western Electric rules, in rule-number order.
pub fn western_electric_rules() -> Vec<Box<dyn RunRule>> {
    vec![
        Box::new(BeyondLimits),
        Box::new(TwoOfThreeBeyondTwoSigma),
        Box::new(FourOfFiveBeyondOneSigma),
        Box::new(EightOnOneSide),
    ]
}

fn one_sigma(limits: &ControlLimits) -> f64 {
    (limits.ucl - limits.cl) / 3.0
}

fn violation(rule: u8, description: &str, severity: Severity) -> Violation {
    Violation {
        rule,
        description: description.to_string(),
        severity,
    }
}

/// Flags the last point of every `window`-wide run in which at least
/// `needed` points lie beyond `width` on one side of the center line.
fn k_of_n_beyond(
    points: &[ControlChartPoint],
    limits: &ControlLimits,
    window: usize,
    needed: usize,
    width: f64,
    make: impl Fn() -> Violation,
) -> Vec<(usize, Violation)> {
    let mut found = Vec::new();
    if points.len() < window {
        return found;
    }
    let upper = limits.cl + width;
    let lower = limits.cl - width;
    for end in (window - 1)..points.len() {
        let run = &points[end + 1 - window..=end];
        let above = run.iter().filter(|p| p.value > upper).count();
        let below = run.iter().filter(|p| p.value < lower).count();
        if above >= needed || below >= needed {
            found.push((end, make()));
        }
    }
    found
}

impl RunRule for BeyondLimits {
    fn check(
        &self,
        points: &[ControlChartPoint],
        limits: &ControlLimits,
    ) -> Vec<(usize, Violation)> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| limits.excludes(p.value))
            .map(|(i, _)| {
                (
                    i,
                    violation(1, "Point beyond 3-sigma control limits", Severity::Critical),
                )
            })
            .collect()
    }
}

impl RunRule for TwoOfThreeBeyondTwoSigma {
    fn check(
        &self,
        points: &[ControlChartPoint],
        limits: &ControlLimits,
    ) -> Vec<(usize, Violation)> {
        k_of_n_beyond(points, limits, 3, 2, 2.0 * one_sigma(limits), || {
            violation(
                2,
                "2 of 3 consecutive points beyond 2 sigma on the same side",
                Severity::Major,
            )
        })
    }
}

impl RunRule for FourOfFiveBeyondOneSigma {
    fn check(
        &self,
        points: &[ControlChartPoint],
        limits: &ControlLimits,
    ) -> Vec<(usize, Violation)> {
        k_of_n_beyond(points, limits, 5, 4, one_sigma(limits), || {
            violation(
                3,
                "4 of 5 consecutive points beyond 1 sigma on the same side",
                Severity::Major,
            )
        })
    }
}

impl RunRule for EightOnOneSide {
    fn check(
        &self,
        points: &[ControlChartPoint],
        limits: &ControlLimits,
    ) -> Vec<(usize, Violation)> {
        let mut found = Vec::new();
        // +1 above, -1 below, 0 on the center line (breaks a run).
        let mut side = 0_i8;
        let mut run_length = 0_usize;
        for (i, p) in points.iter().enumerate() {
            let s = if p.value > limits.cl {
                1
            } else if p.value < limits.cl {
                -1
            } else {
                0
            };
            if s != 0 && s == side {
                run_length += 1;
            } else {
                run_length = usize::from(s != 0);
            }
            side = s;
            if run_length >= 8 {
                found.push((
                    i,
                    violation(
                        4,
                        "8 consecutive points on the same side of the center line",
                        Severity::Warning,
                    ),
                ));
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn limits() -> ControlLimits {
        ControlLimits {
            ucl: 30.0,
            cl: 0.0,
            lcl: -30.0,
        }
    }

    fn make_points(values: &[f64]) -> Vec<ControlChartPoint> {
        let l = limits();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ControlChartPoint {
                sample: i + 1,
                value: v,
                timestamp: DateTime::<Utc>::default(),
                center_line: l.cl,
                upper_control_limit: l.ucl,
                lower_control_limit: l.lcl,
                violations: Vec::new(),
            })
            .collect()
    }

    fn positions(found: &[(usize, Violation)]) -> Vec<usize> {
        found.iter().map(|(i, _)| *i).collect()
    }

    #[test]
    fn rule1_flags_points_beyond_limits() {
        let pts = make_points(&[0.0, 31.0, 5.0, -31.0]);
        let found = BeyondLimits.check(&pts, &limits());
        assert_eq!(positions(&found), vec![1, 3]);
        assert!(found.iter().all(|(_, v)| v.rule == 1 && v.severity == Severity::Critical));
    }

    #[test]
    fn rule1_on_limit_is_not_violation() {
        let pts = make_points(&[30.0, -30.0]);
        assert!(BeyondLimits.check(&pts, &limits()).is_empty());
    }

    #[test]
    fn rule2_two_of_three_above() {
        // 2 sigma = 20
        let pts = make_points(&[0.0, 21.0, 5.0, 22.0]);
        let found = TwoOfThreeBeyondTwoSigma.check(&pts, &limits());
        assert_eq!(positions(&found), vec![3]);
        assert_eq!(found[0].1.severity, Severity::Major);
    }

    #[test]
    fn rule2_not_triggered_on_mixed_sides() {
        let pts = make_points(&[21.0, -21.0, 0.0]);
        assert!(TwoOfThreeBeyondTwoSigma.check(&pts, &limits()).is_empty());
    }

    #[test]
    fn rule3_four_of_five_below() {
        // 1 sigma = 10
        let pts = make_points(&[-11.0, -12.0, 0.0, -11.0, -15.0]);
        let found = FourOfFiveBeyondOneSigma.check(&pts, &limits());
        assert_eq!(positions(&found), vec![4]);
    }

    #[test]
    fn rule4_eight_on_one_side() {
        let pts = make_points(&[1.0; 9]);
        let found = EightOnOneSide.check(&pts, &limits());
        assert_eq!(positions(&found), vec![7, 8]);
        assert_eq!(found[0].1.severity, Severity::Warning);
    }

    #[test]
    fn rule4_seven_not_enough_and_center_breaks_run() {
        let pts = make_points(&[1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(EightOnOneSide.check(&pts, &limits()).is_empty());
    }

    #[test]
    fn western_electric_set_has_four_rules() {
        let rules = western_electric_rules();
        assert_eq!(rules.len(), 4);
        let pts = make_points(&[31.0]);
        let total: usize = rules.iter().map(|r| r.check(&pts, &limits()).len()).sum();
        assert_eq!(total, 1);
    }
}
