//! Sigma level and DPMO.
//!
//! Converts unit, defect and opportunity counts to defects per million
//! opportunities (DPMO), yield and a sigma level, and converts sigma
//! levels back to DPMO and yield. All conversions apply the 1.5-sigma
//! long-term shift unless a [`QualityConfig`](crate::QualityConfig) says
//! otherwise.
//!
//! | Sigma | DPMO    | Yield     |
//! |-------|---------|-----------|
//! | 1     | 690,000 | 30.9%     |
//! | 2     | 308,537 | 69.1%     |
//! | 3     | 66,807  | 93.32%    |
//! | 4     | 6,210   | 99.379%   |
//! | 5     | 233     | 99.9767%  |
//! | 6     | 3.4     | 99.99966% |

mod benchmarks;
mod level;

pub use benchmarks::{benchmarks, SigmaBenchmark, SigmaRating};
pub use level::{
    calculate, dpmo_to_sigma, sigma_to_dpmo, sigma_to_yield, SigmaCalculator, SigmaLevelResult,
    PERFECT_SIGMA, SIX_SIGMA_DPMO,
};
