//! Pareto analysis of defect categories.
//!
//! Ranks categories by count, computes each category's share and the
//! running cumulative share, and splits the ranking into the vital few
//! (cumulative share within the cutoff, 80% by default) and the trivial
//! many.
//!
//! # References
//!
//! - Juran, J.M. (1951). *Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed., §5.4.

mod analysis;

pub use analysis::{
    analyze, analyze_by, analyze_weighted, ParetoAnalyzer, ParetoCount, ParetoItem, ParetoResult,
};
