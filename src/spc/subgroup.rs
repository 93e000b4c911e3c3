//! Validated subgroup data for X-bar and R charts.

use crate::error::{QualityError, Result};
use crate::stats::constants::{MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE};

/// A non-empty sequence of equally sized subgroups with size in `2..=10`
/// and only finite values.
///
/// # Examples
///
/// ```
/// use u_quality::spc::SubgroupSet;
///
/// let set = SubgroupSet::new(&[[1.0, 2.0, 3.0], [2.0, 3.0, 4.0]]).unwrap();
/// assert_eq!(set.subgroup_size(), 3);
/// assert_eq!(set.len(), 2);
///
/// let err = SubgroupSet::new(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]).unwrap_err();
/// assert!(err.to_string().contains("same size"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubgroupSet {
    subgroups: Vec<Vec<f64>>,
    size: usize,
}

impl SubgroupSet {
    /// Validates and copies `subgroups`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the set is empty, sizes differ, the size lies
    /// outside `2..=10`, or a value is not finite.
    pub fn new<S: AsRef<[f64]>>(subgroups: &[S]) -> Result<Self> {
        let first = subgroups.first().ok_or_else(|| {
            QualityError::invalid("at least one subgroup is required")
        })?;
        let size = first.as_ref().len();

        for (i, subgroup) in subgroups.iter().enumerate() {
            let len = subgroup.as_ref().len();
            if len != size {
                return Err(QualityError::invalid(format!(
                    "all subgroups must have the same size: subgroup {} has {len} values, expected {size}",
                    i + 1
                )));
            }
        }
        if !(MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&size) {
            return Err(QualityError::invalid(format!(
                "subgroup size must be between {MIN_SUBGROUP_SIZE} and {MAX_SUBGROUP_SIZE}, got {size}"
            )));
        }
        if !subgroups
            .iter()
            .all(|s| s.as_ref().iter().all(|x| x.is_finite()))
        {
            return Err(QualityError::invalid("subgroup values must all be finite"));
        }

        Ok(Self {
            subgroups: subgroups.iter().map(|s| s.as_ref().to_vec()).collect(),
            size,
        })
    }

    /// Observations per subgroup.
    pub fn subgroup_size(&self) -> usize {
        self.size
    }

    /// Number of subgroups.
    pub fn len(&self) -> usize {
        self.subgroups.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.subgroups.is_empty()
    }

    /// Iterates over the subgroups in order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.subgroups.iter().map(Vec::as_slice)
    }
}
