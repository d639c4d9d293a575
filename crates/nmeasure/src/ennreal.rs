//! Extended nonnegative reals, the codomain of every volume
//!
//! An [ENNReal] is either a finite nonnegative scalar or `∞`.
//! Arithmetic on it is total: no operation fails or produces a value outside the type.
//! The rules follow the usual measure-theory conventions:
//!
//! * `∞ + x = ∞`
//! * `0 · ∞ = 0` (zero absorbs infinity)
//! * `a - b = max(0, a - b)`, `∞ - a = ∞` for finite `a`, and `x - ∞ = 0`
//! * `1 / 0 = ∞` and `1 / ∞ = 0`

use core::cmp::Ordering;
use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub};

use crate::error::{MeasureError, Result};
use crate::scalar::*;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Repr<T> {
    Finite(T),
    Infinite,
}

/// An extended nonnegative real number
///
/// The finite variant always holds a value that is `>= 0` and not NaN;
/// construct values with [of_real](ENNReal::of_real), which clamps anything else to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ENNReal<T>(Repr<T>);

impl<T: Real> ENNReal<T> {
    pub fn zero() -> Self {
        ENNReal(Repr::Finite(T::zero()))
    }

    pub fn one() -> Self {
        ENNReal(Repr::Finite(T::one()))
    }

    pub fn infinity() -> Self {
        ENNReal(Repr::Infinite)
    }

    /// Convert a real scalar, clamping negative values and NaN to zero.
    ///
    /// Positive infinity maps to `∞`.
    pub fn of_real(x: T) -> Self {
        if x.is_nan() || !(x > T::zero()) {
            Self::zero()
        } else if x.is_infinite() {
            Self::infinity()
        } else {
            ENNReal(Repr::Finite(x))
        }
    }

    /// The finite value, or [Unrepresentable](MeasureError::Unrepresentable) for `∞`.
    pub fn to_finite(self) -> Result<T> {
        match self.0 {
            Repr::Finite(x) => Ok(x),
            Repr::Infinite => Err(MeasureError::Unrepresentable),
        }
    }

    /// The finite value, with `∞` mapped to zero.
    pub fn to_real(self) -> T {
        match self.0 {
            Repr::Finite(x) => x,
            Repr::Infinite => T::zero(),
        }
    }

    pub fn is_zero(self) -> bool {
        matches!(self.0, Repr::Finite(x) if !(x > T::zero()))
    }

    pub fn is_infinite(self) -> bool {
        matches!(self.0, Repr::Infinite)
    }

    pub fn is_finite(self) -> bool {
        !self.is_infinite()
    }

    /// Multiply by a finite scalar, which is clamped to be nonnegative first.
    pub fn smul(self, c: T) -> Self {
        self * Self::of_real(c)
    }

    /// The multiplicative inverse, with `1 / 0 = ∞` and `1 / ∞ = 0`
    pub fn inv(self) -> Self {
        match self.0 {
            Repr::Infinite => Self::zero(),
            Repr::Finite(_) if self.is_zero() => Self::infinity(),
            Repr::Finite(x) => Self::of_real(x.recip()),
        }
    }

    /// Raise to a non-negative integer power. `x.pow(0)` is one, even for `0` and `∞`.
    pub fn pow(self, n: u32) -> Self {
        (0..n).fold(Self::one(), |acc, _| acc * self)
    }

    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl<T: Real> Default for ENNReal<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Real> Add for ENNReal<T> {
    type Output = Self;
    fn add(self, r: Self) -> Self {
        match (self.0, r.0) {
            (Repr::Finite(a), Repr::Finite(b)) => Self::of_real(a + b),
            _ => Self::infinity(),
        }
    }
}

impl<T: Real> Mul for ENNReal<T> {
    type Output = Self;
    fn mul(self, r: Self) -> Self {
        if self.is_zero() || r.is_zero() {
            return Self::zero();
        }
        match (self.0, r.0) {
            (Repr::Finite(a), Repr::Finite(b)) => Self::of_real(a * b),
            _ => Self::infinity(),
        }
    }
}

impl<T: Real> Sub for ENNReal<T> {
    type Output = Self;
    fn sub(self, r: Self) -> Self {
        match (self.0, r.0) {
            (Repr::Finite(a), Repr::Finite(b)) => Self::of_real(a - b),
            (Repr::Infinite, Repr::Finite(_)) => Self::infinity(),
            (_, Repr::Infinite) => Self::zero(),
        }
    }
}

impl<T: Real> Div for ENNReal<T> {
    type Output = Self;
    fn div(self, r: Self) -> Self {
        self * r.inv()
    }
}

impl<T: Real> AddAssign for ENNReal<T> {
    fn add_assign(&mut self, r: Self) {
        *self = *self + r;
    }
}

impl<T: Real> MulAssign for ENNReal<T> {
    fn mul_assign(&mut self, r: Self) {
        *self = *self * r;
    }
}

impl<T: Real> Sum for ENNReal<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a, T: Real> Sum<&'a ENNReal<T>> for ENNReal<T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<T: Real> Product for ENNReal<T> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), Mul::mul)
    }
}

impl<T: Real> PartialOrd for ENNReal<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => a.partial_cmp(&b),
            (Repr::Infinite, Repr::Infinite) => Some(Ordering::Equal),
            (Repr::Infinite, Repr::Finite(_)) => Some(Ordering::Greater),
            (Repr::Finite(_), Repr::Infinite) => Some(Ordering::Less),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ENNReal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Finite(x) => x.fmt(f),
            Repr::Infinite => write!(f, "∞"),
        }
    }
}
