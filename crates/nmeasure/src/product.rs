//! Boxes and balls in N dimensions
//!
//! The volume on `Tⁿ` is the product measure of the 1-D interval measure on each axis,
//! so the volume of a box is the product of the lengths of its sides.
//! The product uses [ENNReal] multiplication, which lets a degenerate side
//! absorb an unbounded one: `[0, 0] × [0, ∞)` has volume zero.

use alloc::vec::Vec;

use crate::axes::Axes;
use crate::ennreal::ENNReal;
use crate::error::{MeasureError, Result};
use crate::interval::Interval;
use crate::measure::Volume;
use crate::scalar::*;

/// The Cartesian product of one interval per axis
///
/// The axis set is `0..dim()`.
/// Each axis may be of any interval kind, independently of the others.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalBox<T> {
    axes: Vec<Interval<T>>,
}

impl<T: Real> IntervalBox<T> {
    pub fn new(axes: Vec<Interval<T>>) -> Self {
        IntervalBox { axes }
    }

    /// Build a box from a struct with one interval per named axis
    pub fn from_axes<A: Axes<Interval<T>>>(axes: A) -> Self {
        IntervalBox::new(axes.into_coords())
    }

    /// Convert back into a named-axis struct
    pub fn into_axes<A: Axes<Interval<T>>>(self) -> Result<A> {
        A::from_coords(self.axes)
    }

    /// The same interval repeated along `dim` axes
    pub fn cube(dim: usize, side: Interval<T>) -> Self {
        IntervalBox::new(alloc::vec![side; dim])
    }

    pub fn axes(&self) -> &[Interval<T>] {
        &self.axes
    }

    pub fn axis(&self, i: usize) -> Option<&Interval<T>> {
        self.axes.get(i)
    }

    pub fn is_empty(&self) -> bool {
        self.axes.iter().any(Interval::is_empty)
    }

    pub fn contains(&self, point: &[T]) -> Result<bool> {
        check_dim(self.dim(), point.len())?;
        Ok(self
            .axes
            .iter()
            .zip(point)
            .all(|(axis, &x)| axis.contains(x)))
    }

    /// The image under `p ↦ p + offset`
    pub fn translate(&self, offset: &[T]) -> Result<Self> {
        check_dim(self.dim(), offset.len())?;
        Ok(IntervalBox::new(
            self.axes
                .iter()
                .zip(offset)
                .map(|(axis, &t)| axis.translate(t))
                .collect(),
        ))
    }

    /// Replace the interval on one axis
    pub fn with_axis(&self, i: usize, side: Interval<T>) -> Result<Self> {
        let mut axes = self.axes.clone();
        let dim = axes.len();
        let slot = axes.get_mut(i).ok_or(MeasureError::DomainMismatch {
            expected: dim,
            found: i + 1,
        })?;
        *slot = side;
        Ok(IntervalBox::new(axes))
    }
}

impl<T: Real> Volume<T> for IntervalBox<T> {
    fn dim(&self) -> usize {
        self.axes.len()
    }

    /// Every axis is evaluated, in axis order; a zero axis is not short-circuited.
    fn volume(&self) -> ENNReal<T> {
        self.axes.iter().map(Interval::volume).product()
    }
}

impl<T: Real> FromIterator<Interval<T>> for IntervalBox<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        IntervalBox::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BallKind {
    #[default]
    Open,
    Closed,
}

/// A ball in the sup metric, i.e. an axis-aligned cube centered on a point
///
/// On `Tⁿ` with the product structure, the metric ball of radius `r`
/// is the product of the 1-D balls of radius `r` around each coordinate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ball<T> {
    center: Vec<T>,
    radius: T,
    kind: BallKind,
}

impl<T: Real> Ball<T> {
    pub fn open(center: Vec<T>, radius: T) -> Self {
        Ball {
            center,
            radius,
            kind: BallKind::Open,
        }
    }

    pub fn closed(center: Vec<T>, radius: T) -> Self {
        Ball {
            center,
            radius,
            kind: BallKind::Closed,
        }
    }

    /// An open ball around a point given as a named-axis struct
    pub fn around<A: Axes<T>>(center: A, radius: T) -> Self {
        Ball::open(center.into_coords(), radius)
    }

    pub fn center(&self) -> &[T] {
        &self.center
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    pub fn kind(&self) -> BallKind {
        self.kind
    }

    /// The ball as a product of per-axis intervals
    pub fn to_box(&self) -> IntervalBox<T> {
        self.center
            .iter()
            .map(|&c| match self.kind {
                BallKind::Open => Interval::ball(c, self.radius),
                BallKind::Closed => Interval::closed_ball(c, self.radius),
            })
            .collect()
    }

    pub fn contains(&self, point: &[T]) -> Result<bool> {
        self.to_box().contains(point)
    }
}

impl<T: Real> Volume<T> for Ball<T> {
    fn dim(&self) -> usize {
        self.center.len()
    }

    fn volume(&self) -> ENNReal<T> {
        let empty = match self.kind {
            BallKind::Open => !(self.radius > T::zero()),
            BallKind::Closed => !(self.radius >= T::zero()),
        };
        if empty {
            return ENNReal::zero();
        }
        self.to_box().volume()
    }
}

/// Volume of the closed ball of radius `r` in `n` dimensions: `(2r)ⁿ`.
///
/// A negative radius gives the empty ball.
/// With `n = 0` the space is a single point, so any ball with `r >= 0` has volume one.
pub fn ball_volume<T: Real>(n: usize, r: T) -> ENNReal<T> {
    if !(r >= T::zero()) {
        return ENNReal::zero();
    }
    let diameter = ENNReal::of_real(r + r);
    (0..n).map(|_| diameter).product()
}

fn check_dim(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(MeasureError::DomainMismatch { expected, found })
    }
}
