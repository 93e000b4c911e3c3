//! # u-quality
//!
//! Statistical process control (SPC) and Six Sigma quality metrics.
//!
//! The crate is a calculation core: it takes raw `f64` measurements and
//! counts and returns plain result records. Persistence, presentation and
//! data collection belong to the caller.
//!
//! ## Modules
//!
//! - [`spc`] — Control charts (X̄, R, Individuals, Moving Range) with run rules
//! - [`capability`] — Process capability indices (Cp, Cpk, Pp, Ppk, Cpm)
//! - [`pareto`] — Pareto ranking and the vital-few / trivial-many split
//! - [`sigma`] — Sigma level, DPMO and yield conversions
//! - [`stats`] — Descriptive statistics and control-chart constants
//! - [`special`] — Normal CDF and inverse normal CDF approximations
//! - [`config`] — Acceptance thresholds loaded from TOML
//!
//! ## Example
//!
//! ```
//! use u_quality::{capability, pareto, sigma, spc};
//!
//! let chart = spc::individuals_chart(&[10.0, 10.2, 9.9, 10.1, 10.0]).unwrap();
//! assert!(chart.is_in_control());
//!
//! let cap = capability::calculate(&[10.0, 10.2, 9.9, 10.1, 10.0], 9.0, 11.0, None).unwrap();
//! assert!(cap.cpk > 1.33);
//!
//! let ranking = pareto::analyze([("Scratch", 40), ("Dent", 10)], None).unwrap();
//! assert_eq!(ranking.items[0].category, "Scratch");
//!
//! let level = sigma::calculate(1000, 0, 10).unwrap();
//! assert!(level.meets_six_sigma());
//! ```
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every engine is a value holding only its configuration
//! - **Fail fast**: invalid input returns [`QualityError`] before any computation
//! - **Research-backed**: constants and approximations cite their sources

pub mod capability;
pub mod config;
pub mod error;
pub mod pareto;
pub mod sigma;
pub mod spc;
pub mod special;
pub mod stats;

pub use config::QualityConfig;
pub use error::{QualityError, Result};
