//! Traits that govern the scalar data type used by nmeasure
//!
//! Volumes, endpoints and matrix entries are all expressed in a single scalar type.
//! Most of the library needs only a [Ring] with an ordering;
//! operations that divide (scaling factors, quadrature) additionally need [Real].

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// A scalar datatype whose absolute value can be taken.
pub trait Abs {
    type Output;

    /// Computes the absolute value of a scalar.
    fn abs(self) -> Self::Output;
}

/// A scalar datatype which is closed under addition and multiplication.
///
/// see <https://en.wikipedia.org/wiki/Ring_(mathematics)>
///
/// `Ring` requires that its datatype is `Copy` to avoid the need to clone or borrow when writing
/// mathematical expressions.
pub trait Ring:
    Clone
    + Copy
    + Neg<Output = Self>
    + Abs<Output = Self>
    + Add<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Default
{
    /// The additive identity
    fn zero() -> Self {
        Self::default()
    }

    /// The multiplicative identity
    fn one() -> Self {
        Self::from_integer(1)
    }

    /// Construct an integer scalar
    fn from_integer(i: isize) -> Self;

    /// Raise to a non-negative integer power by repeated squaring.
    ///
    /// `x.pow(0)` is [one](Ring::one) for every `x`, including zero.
    fn pow(self, mut n: u32) -> Self {
        let mut base = self;
        let mut acc = Self::one();
        while n > 0 {
            if n & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            n >>= 1;
        }
        acc
    }
}

/// A scalar datatype which can represent fractional values such as ½.
///
/// Quadrature weights (e.g. the ½ on the end panels of the trapezoid rule,
/// or the ⅓ of Simpson's rule) are built from these.
pub trait Rational: Ring {
    /// Construct a rational scalar
    /// from an integer numerator and integer denominator
    fn from_fraction(numerator: isize, denominator: isize) -> Self;

    /// A scalar value that when multiplied by 2 equals [one](Ring::one)
    fn one_half() -> Self {
        Self::from_fraction(1, 2)
    }

    /// A scalar value that when multiplied by 3 equals [one](Ring::one)
    fn one_third() -> Self {
        Self::from_fraction(1, 3)
    }
}

/// A scalar datatype whose reciprocal can be taken.
///
/// ## `recip()` of `0`
///
/// When given an input of zero,
/// this function must return a valid scalar datatype (e.g. `f32::INFINITY`) or panic.
/// The library only calls `recip()` on values it has already checked to be nonzero;
/// the zero and infinite cases of a scaling factor are handled by
/// [ENNReal::inv](crate::ennreal::ENNReal::inv) instead.
pub trait Recip {
    type Output;
    fn recip(self) -> Self::Output;
}

/// An ordered field that approximates the real line.
///
/// `Real` is the bound used throughout nmeasure for coordinates and volumes.
/// It comes implemented for `f32` and `f64`.
///
/// Values that are not numbers (e.g. `f32::NAN`) are tolerated as inputs:
/// every place that turns a scalar into a volume clamps them to zero,
/// and integration engines report them as
/// [NotMeasurable](crate::error::MeasureError::NotMeasurable).
pub trait Real:
    Rational + Recip<Output = Self> + Div<Self, Output = Self> + PartialOrd + Debug
{
    /// Positive infinity, if the datatype has one.
    ///
    /// Used to recognize infinite inputs, and as the length of an unbounded slice
    /// handed to an integration engine.
    fn infinity() -> Self;

    /// Whether this value is not a number
    fn is_nan(self) -> bool;

    /// Whether this value is positive or negative infinity
    fn is_infinite(self) -> bool;

    /// The larger of two values, preferring `self` when they are unordered
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// The smaller of two values, preferring `self` when they are unordered
    fn min_of(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Convert from a `usize` count, e.g. a number of quadrature panels
    fn from_count(n: usize) -> Self;
}

macro_rules! impl_for_float {
    ($type:ident) => {
        #[cfg(feature = "std")]
        impl Abs for $type {
            type Output = $type;
            fn abs(self) -> $type {
                self.abs()
            }
        }
        #[cfg(not(feature = "std"))]
        impl Abs for $type {
            type Output = $type;
            fn abs(self) -> $type {
                if self < 0. {
                    -self
                } else {
                    self
                }
            }
        }

        impl Ring for $type {
            fn from_integer(i: isize) -> $type {
                i as $type
            }
        }

        impl Rational for $type {
            fn from_fraction(numerator: isize, denominator: isize) -> $type {
                numerator as $type / denominator as $type
            }
        }

        impl Recip for $type {
            type Output = $type;

            fn recip(self) -> $type {
                1. / self
            }
        }

        impl Real for $type {
            fn infinity() -> $type {
                $type::INFINITY
            }
            fn is_nan(self) -> bool {
                self != self
            }
            fn is_infinite(self) -> bool {
                self == $type::INFINITY || self == $type::NEG_INFINITY
            }
            fn from_count(n: usize) -> $type {
                n as $type
            }
        }
    };
}

impl_for_float!(f32);
impl_for_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow() {
        assert_eq!(3_f64.pow(0), 1.);
        assert_eq!(0_f64.pow(0), 1.);
        assert_eq!(2_f64.pow(10), 1024.);
        assert_eq!((-2_f32).pow(3), -8.);
    }

    #[test]
    fn test_float_classification() {
        assert!(Real::is_nan(f64::NAN));
        assert!(!Real::is_nan(1_f64));
        assert!(Real::is_infinite(f32::NEG_INFINITY));
        assert!(!Real::is_infinite(f32::MAX));
        assert_eq!(Real::max_of(1_f64, 2.), 2.);
        assert_eq!(Real::min_of(1_f64, 2.), 1.);
    }
}
