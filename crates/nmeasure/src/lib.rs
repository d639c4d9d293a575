#![cfg_attr(not(feature = "std"), no_std)]

//! nmeasure is a library for measuring volume in N dimensions.
//!
//! nmeasure computes the canonical volume (Lebesgue measure) of
//! [intervals](interval), [boxes and balls](product),
//! and the [region between two functions](region),
//! and tracks how that volume changes under translation,
//! scaling, and [invertible linear maps](linear).
//!
//! Volumes are [extended nonnegative reals](ennreal):
//! a ray or the whole line has infinite volume,
//! and arithmetic on volumes never fails.
//!
//! nmeasure is generic over the [scalar] datatype, and can be used with `f32`, `f64`, or custom datatypes.
//!
//! The parts of measure theory that are not computations are reached through traits,
//! each with a default implementation for the shapes nmeasure knows about:
//! * [MeasurableSetOracle](measure::MeasurableSetOracle) decides measurability
//! * [IntegrationEngine](region::IntegrationEngine) integrates over a domain
//! * [MatrixDecomposer](linear::MatrixDecomposer) factors a matrix into elementary maps
//! * [SecondCountableCover](cover::SecondCountableCover) picks a countable sub-cover
//!
//! The last of these drives [lift_ae](cover::lift_ae),
//! which turns local almost-everywhere statements into a global one.
//!
//! Boxes, balls and matrices are indexed by axis number by default.
//! If you prefer to own your coordinate structs, [derive Axes](axes) on them.
//!
//! nmeasure is `no_std`-compatible (it needs `alloc`).

extern crate alloc;
extern crate self as nmeasure;

pub mod scalar;
pub mod ennreal;
pub mod error;
pub mod measure;
pub mod interval;
pub mod axes;
pub mod product;
pub mod region;
pub mod linear;
pub mod cover;

pub use cover::{lift_ae, lift_ae_guarded};
pub use linear::{linear_scaling_factor, pushforward_volume};
pub use measure::volume;
pub use region::region_between_volume;

/// Items used by code generated from `#[derive(Axes)]`
#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

mod test;
