//! Named coordinate axes
//!
//! Boxes and matrices in nmeasure are indexed by a finite axis set.
//! By default that set is just `0..n`, but callers who prefer to own their
//! coordinate structs can derive [Axes] on them and pass them in directly:
//!
//! ```
//! use nmeasure::axes::Axes;
//! use nmeasure::interval::Interval;
//! use nmeasure::measure::Volume;
//! use nmeasure::product::IntervalBox;
//! use nmeasure::ennreal::ENNReal;
//!
//! #[derive(Axes, Clone, Copy, Debug, PartialEq)]
//! struct Xyz<T> {
//!     x: T,
//!     y: T,
//!     z: T,
//! }
//!
//! let b = IntervalBox::from_axes(Xyz {
//!     x: Interval::closed(0., 2.),
//!     y: Interval::open(1., 4.),
//!     z: Interval::closed_open(-1., 0.),
//! });
//! assert_eq!(b.volume(), ENNReal::of_real(6.));
//! assert_eq!(Xyz::<f64>::NAMES, &["x", "y", "z"]);
//! ```
//!
//! The struct must have a single generic parameter (the field type)
//! and every field must have that type.
//! Fields are numbered in declaration order.

use alloc::vec::Vec;

use crate::error::Result;

/// Derive [Axes](trait@Axes) for a struct whose named fields are the coordinate axes
pub use nmeasure_macros::Axes;

/// A struct with one field per coordinate axis
pub trait Axes<T>: Sized {
    /// Number of axes
    const DIM: usize;

    /// Field names, in axis order
    const NAMES: &'static [&'static str];

    /// The fields, in axis order
    fn into_coords(self) -> Vec<T>;

    /// Rebuild the struct from coordinates in axis order.
    ///
    /// Fails with [DomainMismatch](crate::error::MeasureError::DomainMismatch)
    /// unless exactly [DIM](Axes::DIM) coordinates are given.
    fn from_coords(coords: Vec<T>) -> Result<Self>;

    /// Index of the axis with the given field name
    fn axis_index(name: &str) -> Option<usize> {
        Self::NAMES.iter().position(|&n| n == name)
    }
}
