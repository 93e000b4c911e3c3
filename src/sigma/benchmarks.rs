//! Published sigma benchmarks and the rating ladder keyed off them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the industry sigma table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SigmaBenchmark {
    /// Whole sigma level, 1 through 6.
    pub sigma_level: u8,
    /// Defects per million opportunities.
    pub dpmo: f64,
    /// Yield in percent.
    pub yield_percent: f64,
}

static BENCHMARKS: [SigmaBenchmark; 6] = [
    SigmaBenchmark { sigma_level: 1, dpmo: 690_000.0, yield_percent: 30.9 },
    SigmaBenchmark { sigma_level: 2, dpmo: 308_537.0, yield_percent: 69.1 },
    SigmaBenchmark { sigma_level: 3, dpmo: 66_807.0, yield_percent: 93.32 },
    SigmaBenchmark { sigma_level: 4, dpmo: 6_210.0, yield_percent: 99.379 },
    SigmaBenchmark { sigma_level: 5, dpmo: 233.0, yield_percent: 99.9767 },
    SigmaBenchmark { sigma_level: 6, dpmo: 3.4, yield_percent: 99.99966 },
];

/// The published table for sigma levels 1 through 6.
///
/// These are the textbook figures, not values recomputed through the
/// normal approximation.
pub fn benchmarks() -> &'static [SigmaBenchmark] {
    &BENCHMARKS
}

/// Tier of a sigma level, using whole-sigma thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SigmaRating {
    /// Below 1 sigma.
    BelowOneSigma,
    /// 1 <= sigma < 2.
    OneSigma,
    /// 2 <= sigma < 3.
    TwoSigma,
    /// 3 <= sigma < 4.
    ThreeSigma,
    /// 4 <= sigma < 5.
    FourSigma,
    /// 5 <= sigma < 6.
    FiveSigma,
    /// sigma >= 6.
    SixSigma,
}

impl SigmaRating {
    /// Classifies a sigma level. NaN falls to the lowest tier.
    pub fn from_sigma(sigma_level: f64) -> Self {
        match sigma_level {
            s if s >= 6.0 => Self::SixSigma,
            s if s >= 5.0 => Self::FiveSigma,
            s if s >= 4.0 => Self::FourSigma,
            s if s >= 3.0 => Self::ThreeSigma,
            s if s >= 2.0 => Self::TwoSigma,
            s if s >= 1.0 => Self::OneSigma,
            _ => Self::BelowOneSigma,
        }
    }

    /// Industry comparison for the tier.
    pub fn benchmark(&self) -> &'static str {
        match self {
            Self::SixSigma => "World class: 3.4 defects per million opportunities",
            Self::FiveSigma => "Excellent: best-in-class manufacturing",
            Self::FourSigma => "Good: industry average for well-run operations",
            Self::ThreeSigma => "Average: typical of most manufacturing",
            Self::TwoSigma => "Below average: significant quality problems",
            Self::OneSigma => "Poor: majority of output is defective",
            Self::BelowOneSigma => "Critical: process is not producing acceptable output",
        }
    }
}

impl fmt::Display for SigmaRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BelowOneSigma => "Below 1 Sigma",
            Self::OneSigma => "1 Sigma",
            Self::TwoSigma => "2 Sigma",
            Self::ThreeSigma => "3 Sigma",
            Self::FourSigma => "4 Sigma",
            Self::FiveSigma => "5 Sigma",
            Self::SixSigma => "6 Sigma",
        };
        f.write_str(name)
    }
}
