//! Errors reported by volume, scaling and integration queries
//!
//! Every error is a precondition violation by the caller.
//! None of them are transient, so none are worth retrying.
//! [ENNReal](crate::ennreal::ENNReal) arithmetic itself never produces an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    /// The matrix has determinant zero, so there is no scaling factor.
    #[error("matrix is singular; its image has no meaningful volume ratio")]
    SingularMatrix,

    /// An infinite volume was converted to a finite scalar.
    #[error("infinite value cannot be represented as a finite scalar")]
    Unrepresentable,

    /// A set or integrand failed the measurability precondition of a query.
    #[error("not measurable: {reason}")]
    NotMeasurable { reason: &'static str },

    /// The axis sets of two operands do not agree.
    #[error("axis count mismatch: expected {expected}, found {found}")]
    DomainMismatch { expected: usize, found: usize },

    /// A transvection was asked to shear an axis by itself.
    #[error("transvection must shear two distinct axes, got axis {axis} twice")]
    DegenerateTransvection { axis: usize },

    /// A quadrature rule was asked to integrate over a ray or the whole line.
    #[error("quadrature requires a bounded domain")]
    UnboundedDomain,
}

pub type Result<T> = core::result::Result<T, MeasureError>;

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        assert_eq!(
            MeasureError::DomainMismatch {
                expected: 3,
                found: 2
            }
            .to_string(),
            "axis count mismatch: expected 3, found 2"
        );
        assert_eq!(
            MeasureError::NotMeasurable {
                reason: "integrand is undefined"
            }
            .to_string(),
            "not measurable: integrand is undefined"
        );
    }
}
