//! Statistical Process Control (SPC) charts.
//!
//! # Charts
//!
//! - [`ControlChartEngine::xbar_chart`] — subgroup means (n = 2..10)
//! - [`ControlChartEngine::r_chart`] — subgroup ranges (n = 2..10)
//! - [`ControlChartEngine::individuals_chart`] — single observations
//! - [`ControlChartEngine::moving_range_chart`] — consecutive differences
//!
//! Free functions with the same names run the default engine. The
//! `*_from_set` variants take a [`SubgroupSet`] validated once up front.
//!
//! # Run Rules
//!
//! - [`BeyondLimits`] — Rule 1, applied by default
//! - [`TwoOfThreeBeyondTwoSigma`], [`FourOfFiveBeyondOneSigma`],
//!   [`EightOnOneSide`] — Western Electric Rules 2-4, opt-in
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

mod chart;
mod rules;
mod subgroup;
mod variables;

pub use chart::{ChartType, ControlChartPoint, ControlChartResult, ControlLimits, Severity, Violation};
pub use rules::{
    western_electric_rules, BeyondLimits, EightOnOneSide, FourOfFiveBeyondOneSigma, RunRule,
    TwoOfThreeBeyondTwoSigma,
};
pub use subgroup::SubgroupSet;
pub use variables::{
    individuals_chart, moving_range_chart, r_chart, r_chart_from_set, xbar_chart,
    xbar_chart_from_set, ControlChartEngine,
};
