//! Process capability analysis.
//!
//! Computes standard capability indices for assessing how well a process
//! meets two-sided specification limits.
//!
//! # Indices
//!
//! - **Cp** — Potential capability (spread vs tolerance)
//! - **Cpk** — Actual capability (centering considered)
//! - **Pp**, **Ppk** — Performance indices, equal to Cp/Cpk here
//! - **Cpm** — Taguchi capability (target deviation)
//!
//! Out-of-spec percentages are estimated from the normal tail beyond each
//! limit.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;

pub use indices::{calculate, cp, cpk, CapabilityAnalysis, CapabilityRating, CapabilityResult};
