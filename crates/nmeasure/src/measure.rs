//! The seam between concrete shapes and the measure they are sized by
//!
//! Every shape that nmeasure can size implements [Volume].
//! Whether a caller-described set is measurable at all is answered by a
//! [MeasurableSetOracle]; [BorelSets] answers yes for every shape in this crate,
//! since intervals, boxes and balls are all Borel.

use crate::cover::{NullSet, RealSet};
use crate::ennreal::ENNReal;
use crate::error::{MeasureError, Result};
use crate::interval::Interval;
use crate::product::{Ball, IntervalBox};
use crate::scalar::*;

/// A set with a Lebesgue volume
pub trait Volume<T: Real> {
    /// Number of coordinate axes of the space this set lives in
    fn dim(&self) -> usize;

    /// The Lebesgue measure of this set
    fn volume(&self) -> ENNReal<T>;
}

/// Decides whether a set description denotes a measurable set.
///
/// A volume returned for a set that is not measurable cannot be trusted,
/// so [checked_volume] consults an oracle before reporting one.
pub trait MeasurableSetOracle<S: ?Sized> {
    fn is_measurable(&self, set: &S) -> bool;
}

/// The oracle for the Borel sigma-algebra on the shapes defined in this crate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorelSets;

macro_rules! impl_borel {
    ($($shape:ident),*) => {
        $(
            impl<T: Real> MeasurableSetOracle<$shape<T>> for BorelSets {
                fn is_measurable(&self, _set: &$shape<T>) -> bool {
                    true
                }
            }
        )*
    };
}

impl_borel!(Interval, IntervalBox, Ball, RealSet, NullSet);

/// The volume of any shape
pub fn volume<T: Real, S: Volume<T> + ?Sized>(set: &S) -> ENNReal<T> {
    set.volume()
}

/// The volume of a set, after the oracle confirms it is measurable
pub fn checked_volume<T: Real, S: Volume<T> + ?Sized>(
    oracle: &impl MeasurableSetOracle<S>,
    set: &S,
) -> Result<ENNReal<T>> {
    if !oracle.is_measurable(set) {
        return Err(MeasureError::NotMeasurable {
            reason: "oracle rejected the set",
        });
    }
    Ok(set.volume())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only admits intervals that are bounded on both sides
    struct BoundedOnly;

    impl MeasurableSetOracle<Interval<f64>> for BoundedOnly {
        fn is_measurable(&self, set: &Interval<f64>) -> bool {
            set.infimum().is_some() && set.supremum().is_some()
        }
    }

    #[test]
    fn test_checked_volume() {
        let i = Interval::closed(1., 4.);
        assert_eq!(checked_volume(&BorelSets, &i), Ok(ENNReal::of_real(3.)));
        assert_eq!(checked_volume(&BoundedOnly, &i), Ok(ENNReal::of_real(3.)));
        assert!(matches!(
            checked_volume(&BoundedOnly, &Interval::at_least(0.)),
            Err(MeasureError::NotMeasurable { .. })
        ));
    }

    #[test]
    fn test_volume_free_function() {
        assert_eq!(volume(&Interval::line()), ENNReal::<f64>::infinity());
    }
}
