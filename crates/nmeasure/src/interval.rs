//! Intervals of the real line and their length
//!
//! An [Interval] is a pair of [Bound]s, which covers every kind of interval at once:
//! the four bounded kinds (closed, open, and both half-open kinds),
//! the rays, the whole line, and single points.
//!
//! The 1-D Lebesgue measure of an interval depends only on its endpoints:
//! `[a, b]`, `[a, b)`, `(a, b]` and `(a, b)` all have volume `max(0, b - a)`,
//! since they differ only on their endpoints and points have volume zero.
//! Rays and the whole line have infinite volume.

use core::fmt;
use core::ops::{
    Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

use crate::ennreal::ENNReal;
use crate::measure::Volume;
use crate::scalar::*;

/// A connected subset of the real line
///
/// ```
/// use nmeasure::interval::Interval;
/// use nmeasure::measure::Volume;
/// use nmeasure::ennreal::ENNReal;
///
/// let i = Interval::from(1.0..4.0);
/// assert_eq!(i.volume(), ENNReal::of_real(3.0));
/// assert_eq!(Interval::point(2.0).volume(), ENNReal::zero());
/// assert!(Interval::at_least(0.0).volume().is_infinite());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    lower: Bound<T>,
    upper: Bound<T>,
}

impl<T> Interval<T> {
    pub fn new(lower: Bound<T>, upper: Bound<T>) -> Self {
        Interval { lower, upper }
    }

    /// The whole real line
    pub fn line() -> Self {
        Interval::new(Bound::Unbounded, Bound::Unbounded)
    }

    pub fn lower(&self) -> Bound<&T> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Bound<&T> {
        self.upper.as_ref()
    }
}

impl<T: Real> Interval<T> {
    /// `[lo, hi]`
    pub fn closed(lo: T, hi: T) -> Self {
        Interval::new(Bound::Included(lo), Bound::Included(hi))
    }

    /// `(lo, hi)`
    pub fn open(lo: T, hi: T) -> Self {
        Interval::new(Bound::Excluded(lo), Bound::Excluded(hi))
    }

    /// `[lo, hi)`
    pub fn closed_open(lo: T, hi: T) -> Self {
        Interval::new(Bound::Included(lo), Bound::Excluded(hi))
    }

    /// `(lo, hi]`
    pub fn open_closed(lo: T, hi: T) -> Self {
        Interval::new(Bound::Excluded(lo), Bound::Included(hi))
    }

    /// `[lo, ∞)`
    pub fn at_least(lo: T) -> Self {
        Interval::new(Bound::Included(lo), Bound::Unbounded)
    }

    /// `(lo, ∞)`
    pub fn greater_than(lo: T) -> Self {
        Interval::new(Bound::Excluded(lo), Bound::Unbounded)
    }

    /// `(-∞, hi]`
    pub fn at_most(hi: T) -> Self {
        Interval::new(Bound::Unbounded, Bound::Included(hi))
    }

    /// `(-∞, hi)`
    pub fn less_than(hi: T) -> Self {
        Interval::new(Bound::Unbounded, Bound::Excluded(hi))
    }

    /// The single point `{x}`
    pub fn point(x: T) -> Self {
        Interval::closed(x, x)
    }

    /// An interval containing no points
    pub fn empty() -> Self {
        Interval::open(T::zero(), T::zero())
    }

    /// The closed interval between `a` and `b`, in whichever order they are given
    pub fn uicc(a: T, b: T) -> Self {
        Interval::closed(a.min_of(b), a.max_of(b))
    }

    /// The open ball `(center - radius, center + radius)`
    pub fn ball(center: T, radius: T) -> Self {
        Interval::open(center - radius, center + radius)
    }

    /// The closed ball `[center - radius, center + radius]`
    pub fn closed_ball(center: T, radius: T) -> Self {
        Interval::closed(center - radius, center + radius)
    }

    /// The greatest lower bound, or `None` if the interval is unbounded below
    pub fn infimum(&self) -> Option<T> {
        match self.lower {
            Bound::Included(x) | Bound::Excluded(x) => Some(x),
            Bound::Unbounded => None,
        }
    }

    /// The least upper bound, or `None` if the interval is unbounded above
    pub fn supremum(&self) -> Option<T> {
        match self.upper {
            Bound::Included(x) | Bound::Excluded(x) => Some(x),
            Bound::Unbounded => None,
        }
    }

    /// Whether the infimum is a member of the interval
    pub fn attains_infimum(&self) -> bool {
        matches!(self.lower, Bound::Included(_)) && !self.is_empty()
    }

    /// Whether the supremum is a member of the interval
    pub fn attains_supremum(&self) -> bool {
        matches!(self.upper, Bound::Included(_)) && !self.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (Bound::Included(lo), Bound::Included(hi)) => !(lo <= hi),
            (
                Bound::Included(lo) | Bound::Excluded(lo),
                Bound::Included(hi) | Bound::Excluded(hi),
            ) => !(lo < hi),
            _ => false,
        }
    }

    pub fn contains(&self, x: T) -> bool {
        let above = match self.lower {
            Bound::Included(lo) => lo <= x,
            Bound::Excluded(lo) => lo < x,
            Bound::Unbounded => !x.is_nan(),
        };
        let below = match self.upper {
            Bound::Included(hi) => x <= hi,
            Bound::Excluded(hi) => x < hi,
            Bound::Unbounded => !x.is_nan(),
        };
        above && below
    }

    /// The image under `x ↦ x + t`
    pub fn translate(&self, t: T) -> Self {
        Interval::new(self.lower.map(|x| x + t), self.upper.map(|x| x + t))
    }

    /// The image under `x ↦ a·x`
    ///
    /// A negative factor reflects the interval, swapping which end is open.
    /// A zero factor collapses a nonempty interval onto the point `{0}`.
    pub fn scale(&self, a: T) -> Self {
        if a > T::zero() {
            Interval::new(self.lower.map(|x| a * x), self.upper.map(|x| a * x))
        } else if a < T::zero() {
            Interval::new(self.upper.map(|x| a * x), self.lower.map(|x| a * x))
        } else if self.is_empty() {
            Interval::empty()
        } else {
            Interval::point(T::zero())
        }
    }

    /// The preimage under `x ↦ a·x`, i.e. the set of `x` with `a·x` in this interval
    pub fn preimage_scale(&self, a: T) -> Self {
        if a > T::zero() || a < T::zero() {
            self.scale(a.recip())
        } else if self.contains(T::zero()) {
            Interval::line()
        } else {
            Interval::empty()
        }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        Interval::new(
            tighter_lower(self.lower, other.lower),
            tighter_upper(self.upper, other.upper),
        )
    }
}

fn tighter_lower<T: Real>(a: Bound<T>, b: Bound<T>) -> Bound<T> {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other,
        (Bound::Included(x) | Bound::Excluded(x), Bound::Included(y) | Bound::Excluded(y)) => {
            if x > y {
                a
            } else if y > x {
                b
            } else if matches!(a, Bound::Excluded(_)) {
                a
            } else {
                b
            }
        }
    }
}

fn tighter_upper<T: Real>(a: Bound<T>, b: Bound<T>) -> Bound<T> {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other,
        (Bound::Included(x) | Bound::Excluded(x), Bound::Included(y) | Bound::Excluded(y)) => {
            if x < y {
                a
            } else if y < x {
                b
            } else if matches!(a, Bound::Excluded(_)) {
                a
            } else {
                b
            }
        }
    }
}

impl<T: Real> Volume<T> for Interval<T> {
    fn dim(&self) -> usize {
        1
    }

    fn volume(&self) -> ENNReal<T> {
        match (self.infimum(), self.supremum()) {
            (Some(lo), Some(hi)) => ENNReal::of_real(hi - lo),
            _ => ENNReal::infinity(),
        }
    }
}

impl<T> RangeBounds<T> for Interval<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.lower()
    }
    fn end_bound(&self) -> Bound<&T> {
        self.upper()
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl<T: Copy> From<$range> for Interval<T> {
                fn from(r: $range) -> Self {
                    Interval::new(r.start_bound().cloned(), r.end_bound().cloned())
                }
            }
        )*
    };
}

impl_from_range!(Range<T>, RangeInclusive<T>, RangeFrom<T>, RangeTo<T>, RangeToInclusive<T>);

impl<T> From<RangeFull> for Interval<T> {
    fn from(_: RangeFull) -> Self {
        Interval::line()
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Bound::Included(x) => write!(f, "[{}", x)?,
            Bound::Excluded(x) => write!(f, "({}", x)?,
            Bound::Unbounded => write!(f, "(-∞")?,
        }
        write!(f, ", ")?;
        match &self.upper {
            Bound::Included(x) => write!(f, "{}]", x),
            Bound::Excluded(x) => write!(f, "{})", x),
            Bound::Unbounded => write!(f, "∞)"),
        }
    }
}
