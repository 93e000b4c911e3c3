//! Error type shared by every calculator in the crate.
//!
//! Two kinds of failure exist: the caller handed in something the
//! calculation cannot accept ([`QualityError::InvalidInput`]), or a
//! control-chart constant was requested for a subgroup size that the
//! tables do not cover ([`QualityError::OutOfRange`]).
//!
//! Messages name the violated condition in plain words ("at least 2",
//! "same size", "greater than", ...). Callers are allowed to match on
//! those phrases.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Failure raised by a quality calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QualityError {
    /// The input is structurally or semantically invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A subgroup-size constant was requested outside `[2, 10]`.
    #[error("{name} constant is only tabulated for subgroup sizes 2..=10, got {size}")]
    OutOfRange {
        /// Name of the requested constant (`d2`, `A2`, ...).
        name: &'static str,
        /// Requested subgroup size.
        size: usize,
    },
}

impl QualityError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns `true` for [`QualityError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` for [`QualityError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Rejects slices holding NaN or infinite values.
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    if values.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(QualityError::invalid(format!("{what} must all be finite")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display_keeps_message() {
        let err = QualityError::invalid("values must contain at least 2 elements");
        assert!(err.to_string().contains("at least 2"));
        assert!(err.is_invalid_input());
        assert!(!err.is_out_of_range());
    }

    #[test]
    fn out_of_range_display_names_constant_and_size() {
        let err = QualityError::OutOfRange { name: "d2", size: 15 };
        let msg = err.to_string();
        assert!(msg.contains("d2"));
        assert!(msg.contains("15"));
        assert!(err.is_out_of_range());
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(ensure_finite(&[1.0, 2.0], "values").is_ok());
        assert!(ensure_finite(&[1.0, f64::NAN], "values").is_err());
        assert!(ensure_finite(&[f64::INFINITY], "values").is_err());
    }
}
