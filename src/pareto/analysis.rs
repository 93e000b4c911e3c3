//! Pareto ranking of categorical counts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::QualityConfig;
use crate::error::{QualityError, Result};

/// Slack on the vital-few cutoff so that a running sum landing on exactly
/// 80% is not lost to rounding.
const CUTOFF_TOLERANCE: f64 = 1e-9;

/// A value usable as a Pareto count.
///
/// Implemented for the primitive integers and floats, and for references
/// to them, so both `HashMap<String, usize>` and `&HashMap<String, f64>`
/// can be passed straight to [`ParetoAnalyzer::analyze`]. Integers above
/// 2^53 lose precision in the conversion.
pub trait ParetoCount {
    /// The count as `f64`.
    fn to_count(self) -> f64;
}

macro_rules! impl_pareto_count {
    ($($t:ty),*) => {
        $(
            impl ParetoCount for $t {
                fn to_count(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_pareto_count!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T: ParetoCount + Copy> ParetoCount for &T {
    fn to_count(self) -> f64 {
        (*self).to_count()
    }
}

/// One ranked category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoItem {
    /// Category label, unique within a result.
    pub category: String,
    /// Count (or summed weight) for the category.
    pub count: f64,
    /// Share of the total, in percent.
    pub percentage: f64,
    /// Running share up to and including this item, in percent.
    pub cumulative_percentage: f64,
    /// 1-based position in descending order.
    pub rank: usize,
    /// `true` while the cumulative percentage stays within the cutoff.
    pub vital_few: bool,
}

/// Categories ranked by count, largest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoResult {
    /// Optional chart title.
    pub title: Option<String>,
    /// Ranked items.
    pub items: Vec<ParetoItem>,
    /// Sum of all counts.
    pub total_count: f64,
}

impl ParetoResult {
    /// Items flagged as vital. Always a prefix of [`items`](Self::items).
    pub fn vital_few(&self) -> &[ParetoItem] {
        &self.items[..self.vital_len()]
    }

    /// Items after the vital few.
    pub fn trivial_many(&self) -> &[ParetoItem] {
        &self.items[self.vital_len()..]
    }

    /// Labels in rank order.
    pub fn category_labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.category.as_str()).collect()
    }

    /// Looks up an item by label.
    pub fn item(&self, category: &str) -> Option<&ParetoItem> {
        self.items.iter().find(|i| i.category == category)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when no categories were supplied.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn vital_len(&self) -> usize {
        self.items.partition_point(|i| i.vital_few)
    }
}

/// Builds Pareto rankings.
///
/// Equal counts keep the order in which their categories were first seen.
/// A label supplied more than once has its counts summed into the first
/// occurrence.
///
/// # Examples
///
/// ```
/// use u_quality::pareto::ParetoAnalyzer;
///
/// let analyzer = ParetoAnalyzer::new();
/// let result = analyzer
///     .analyze([("Scratch", 50), ("Dent", 30), ("Crack", 15), ("Other", 5)], Some("Defects"))
///     .unwrap();
///
/// assert_eq!(result.total_count, 100.0);
/// assert_eq!(result.category_labels(), vec!["Scratch", "Dent", "Crack", "Other"]);
/// assert_eq!(result.vital_few().len(), 2);
/// assert!((result.items[3].cumulative_percentage - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParetoAnalyzer {
    config: QualityConfig,
}

impl ParetoAnalyzer {
    /// Analyzer with the 80% cutoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration (only `vital_few_cutoff` is used).
    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Ranks `(category, count)` pairs.
    ///
    /// Empty input gives an empty result with a zero total. When every
    /// count is zero all percentages are 0 and every item is vital.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a count is negative or not finite.
    pub fn analyze<I, K, V>(&self, counts: I, title: Option<&str>) -> Result<ParetoResult>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ParetoCount,
    {
        let mut merged: Vec<(String, f64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (category, count) in counts {
            let category = category.into();
            let count = count.to_count();
            if !count.is_finite() {
                return Err(QualityError::invalid(format!(
                    "count for category '{category}' must be finite"
                )));
            }
            if count < 0.0 {
                return Err(QualityError::invalid(format!(
                    "count for category '{category}' must not be negative, got {count}"
                )));
            }
            match index.get(&category) {
                Some(&pos) => merged[pos].1 += count,
                None => {
                    index.insert(category.clone(), merged.len());
                    merged.push((category, count));
                }
            }
        }

        // Stable: ties stay in first-seen order.
        merged.sort_by(|a, b| b.1.total_cmp(&a.1));

        let total_count: f64 = merged.iter().map(|(_, c)| c).sum();
        if !total_count.is_finite() {
            return Err(QualityError::invalid(format!(
                "total count must be finite, got {total_count}"
            )));
        }
        let cutoff = self.config.vital_few_cutoff + CUTOFF_TOLERANCE;
        let share = |value: f64| {
            if total_count > 0.0 {
                value / total_count * 100.0
            } else {
                0.0
            }
        };

        let mut running = 0.0;
        let items: Vec<ParetoItem> = merged
            .into_iter()
            .enumerate()
            .map(|(i, (category, count))| {
                running += count;
                let cumulative_percentage = share(running);
                ParetoItem {
                    category,
                    count,
                    percentage: share(count),
                    cumulative_percentage,
                    rank: i + 1,
                    vital_few: cumulative_percentage <= cutoff,
                }
            })
            .collect();

        let result = ParetoResult {
            title: title.map(str::to_owned),
            items,
            total_count,
        };
        tracing::debug!(
            categories = result.len(),
            total = result.total_count,
            vital = result.vital_few().len(),
            "ranked pareto categories"
        );
        Ok(result)
    }

    /// Groups raw records by `category` and counts each group.
    ///
    /// # Errors
    ///
    /// Never fails for a finite number of records; the `Result` mirrors
    /// [`analyze`](Self::analyze).
    pub fn analyze_by<T, F, K>(
        &self,
        records: &[T],
        category: F,
        title: Option<&str>,
    ) -> Result<ParetoResult>
    where
        F: Fn(&T) -> K,
        K: Into<String>,
    {
        self.analyze(records.iter().map(|r| (category(r), 1.0)), title)
    }

    /// Groups raw records by `category` and sums `weight` within each group.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a weight is negative or not finite.
    pub fn analyze_weighted<T, F, K, W>(
        &self,
        records: &[T],
        category: F,
        weight: W,
        title: Option<&str>,
    ) -> Result<ParetoResult>
    where
        F: Fn(&T) -> K,
        K: Into<String>,
        W: Fn(&T) -> f64,
    {
        self.analyze(records.iter().map(|r| (category(r), weight(r))), title)
    }

    /// Labels of the vital few.
    pub fn get_vital_few<I, K, V>(&self, counts: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ParetoCount,
    {
        let result = self.analyze(counts, None)?;
        Ok(result.vital_few().iter().map(|i| i.category.clone()).collect())
    }

    /// Labels of the trivial many.
    pub fn get_trivial_many<I, K, V>(&self, counts: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ParetoCount,
    {
        let result = self.analyze(counts, None)?;
        Ok(result
            .trivial_many()
            .iter()
            .map(|i| i.category.clone())
            .collect())
    }
}

/// [`ParetoAnalyzer::analyze`] with the 80% cutoff.
pub fn analyze<I, K, V>(counts: I, title: Option<&str>) -> Result<ParetoResult>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ParetoCount,
{
    ParetoAnalyzer::new().analyze(counts, title)
}

/// [`ParetoAnalyzer::analyze_by`] with the 80% cutoff.
pub fn analyze_by<T, F, K>(records: &[T], category: F, title: Option<&str>) -> Result<ParetoResult>
where
    F: Fn(&T) -> K,
    K: Into<String>,
{
    ParetoAnalyzer::new().analyze_by(records, category, title)
}

/// [`ParetoAnalyzer::analyze_weighted`] with the 80% cutoff.
pub fn analyze_weighted<T, F, K, W>(
    records: &[T],
    category: F,
    weight: W,
    title: Option<&str>,
) -> Result<ParetoResult>
where
    F: Fn(&T) -> K,
    K: Into<String>,
    W: Fn(&T) -> f64,
{
    ParetoAnalyzer::new().analyze_weighted(records, category, weight, title)
}
