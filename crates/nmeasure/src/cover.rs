//! Lifting local almost-everywhere statements to a whole set
//!
//! Suppose a predicate `p` is known to hold almost everywhere on `s ∩ (a, b)`
//! for every pair `a < b` of points of `s`. Then `p` holds almost everywhere on `s`:
//!
//! 1. The open intervals `(a, b)` with endpoints in `s` cover `s` except for at most
//!    its two extremes, and a countable sub-family already has the same union
//!    (a [SecondCountableCover] produces one).
//! 2. The leftover extremes are finitely many points, which have volume zero.
//! 3. On each covering interval the exceptional set is null by hypothesis,
//!    and a countable union of null sets is null.
//!
//! [lift_ae] runs that argument on a concrete [RealSet] and returns a
//! [GlobalAeWitness] that records the cover, the leftover extremes,
//! and every exceptional point the local obligations reported.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::Bound;

use crate::ennreal::ENNReal;
use crate::interval::Interval;
use crate::measure::Volume;
use crate::scalar::*;

/// A finite union of intervals of the real line
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "RealSetRepr<T>",
        bound(deserialize = "T: Real + serde::Deserialize<'de>")
    )
)]
pub struct RealSet<T> {
    pieces: Vec<Interval<T>>,
}

impl<T: Real> RealSet<T> {
    /// Empty pieces are dropped; the rest may overlap and come in any order.
    pub fn new(pieces: Vec<Interval<T>>) -> Self {
        RealSet {
            pieces: pieces.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }

    pub fn empty() -> Self {
        RealSet { pieces: Vec::new() }
    }

    pub fn pieces(&self) -> &[Interval<T>] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, x: T) -> bool {
        self.pieces.iter().any(|p| p.contains(x))
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut pieces = self.pieces.clone();
        pieces.extend_from_slice(&other.pieces);
        RealSet { pieces }
    }

    /// The greatest lower bound, or `None` if the set is empty or unbounded below
    pub fn infimum(&self) -> Option<T> {
        self.lowest_piece().and_then(Interval::infimum)
    }

    /// The least upper bound, or `None` if the set is empty or unbounded above
    pub fn supremum(&self) -> Option<T> {
        self.highest_piece().and_then(Interval::supremum)
    }

    pub fn attains_infimum(&self) -> bool {
        self.lowest_piece().is_some_and(Interval::attains_infimum)
    }

    pub fn attains_supremum(&self) -> bool {
        self.highest_piece().is_some_and(Interval::attains_supremum)
    }

    /// The piece whose lower bound is the lower bound of the set,
    /// preferring one that attains it
    fn lowest_piece(&self) -> Option<&Interval<T>> {
        self.pieces.iter().reduce(|best, p| {
            if looser(p.lower(), best.lower(), |a, b| a < b) {
                p
            } else {
                best
            }
        })
    }

    fn highest_piece(&self) -> Option<&Interval<T>> {
        self.pieces.iter().reduce(|best, p| {
            if looser(p.upper(), best.upper(), |a, b| a > b) {
                p
            } else {
                best
            }
        })
    }
}

/// Whether bound `a` lets in more of the line than bound `b`.
/// `beyond(x, y)` is true when `x` lies further out than `y`.
fn looser<T: Real>(a: Bound<&T>, b: Bound<&T>, beyond: impl Fn(T, T) -> bool) -> bool {
    match (a, b) {
        (_, Bound::Unbounded) => false,
        (Bound::Unbounded, _) => true,
        (Bound::Included(&x), Bound::Excluded(&y)) => !beyond(y, x),
        (Bound::Included(&x) | Bound::Excluded(&x), Bound::Included(&y) | Bound::Excluded(&y)) => {
            beyond(x, y)
        }
    }
}

impl<T: Real> From<Interval<T>> for RealSet<T> {
    fn from(i: Interval<T>) -> Self {
        RealSet::new(alloc::vec![i])
    }
}

impl<T: Real> FromIterator<Interval<T>> for RealSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        RealSet::new(iter.into_iter().collect())
    }
}

impl<T: Real> Volume<T> for RealSet<T> {
    fn dim(&self) -> usize {
        1
    }

    /// Overlapping pieces are merged, so shared stretches are counted once.
    fn volume(&self) -> ENNReal<T> {
        let mut spans = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            match (piece.infimum(), piece.supremum()) {
                (Some(lo), Some(hi)) => spans.push((lo, hi)),
                _ => return ENNReal::infinity(),
            }
        }
        spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut total = ENNReal::zero();
        let mut current: Option<(T, T)> = None;
        for (lo, hi) in spans {
            current = match current {
                Some((cur_lo, cur_hi)) if lo <= cur_hi => Some((cur_lo, cur_hi.max_of(hi))),
                Some((cur_lo, cur_hi)) => {
                    total += ENNReal::of_real(cur_hi - cur_lo);
                    Some((lo, hi))
                }
                None => Some((lo, hi)),
            };
        }
        if let Some((lo, hi)) = current {
            total += ENNReal::of_real(hi - lo);
        }
        total
    }
}

/// A finite set of points, kept sorted and without duplicates
///
/// Every such set has volume zero, because the interval measure has no atoms.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "NullSetRepr<T>",
        bound(deserialize = "T: Real + serde::Deserialize<'de>")
    )
)]
pub struct NullSet<T> {
    points: Vec<T>,
}

impl<T: Real> NullSet<T> {
    /// NaN points are dropped.
    pub fn new(mut points: Vec<T>) -> Self {
        points.retain(|x| !x.is_nan());
        points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        points.dedup();
        NullSet { points }
    }

    pub fn empty() -> Self {
        NullSet { points: Vec::new() }
    }

    pub fn points(&self) -> &[T] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, x: T) -> bool {
        self.points
            .binary_search_by(|p| p.partial_cmp(&x).unwrap_or(Ordering::Less))
            .is_ok()
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut points = self.points.clone();
        points.extend_from_slice(&other.points);
        NullSet::new(points)
    }

    /// The points satisfying `keep`
    pub fn restricted(&self, keep: impl Fn(T) -> bool) -> Self {
        NullSet {
            points: self.points.iter().copied().filter(|&x| keep(x)).collect(),
        }
    }
}

impl<T: Real> FromIterator<T> for NullSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        NullSet::new(iter.into_iter().collect())
    }
}

impl<T: Real> Volume<T> for NullSet<T> {
    fn dim(&self) -> usize {
        1
    }

    fn volume(&self) -> ENNReal<T> {
        self.points.iter().map(|&x| Interval::point(x).volume()).sum()
    }
}

/// Produces a countable family of open intervals `(a, b)`,
/// with `a < b` both in `s`, whose union is the union of all such intervals.
///
/// The family is returned as an ordered sequence so that folds over it are deterministic.
pub trait SecondCountableCover<T: Real> {
    fn cover(&self, s: &RealSet<T>) -> Vec<(T, T)>;
}

/// A cover by nested intervals that exhaust `(inf s, sup s)`
///
/// An attained extreme is used directly as an endpoint.
/// Toward an extreme that is not attained, endpoints are halved toward it
/// until halving stops producing a new representable point,
/// and toward an infinite extreme they are pushed outward until the scalar overflows.
/// Each side takes at most `max_refinements` steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DyadicCover {
    pub max_refinements: usize,
}

impl Default for DyadicCover {
    fn default() -> Self {
        DyadicCover {
            max_refinements: 4096,
        }
    }
}

impl DyadicCover {
    pub fn new(max_refinements: usize) -> Self {
        DyadicCover { max_refinements }
    }

    /// Points of `piece`, decreasing toward its lower bound
    fn chain_below<T: Real>(&self, piece: &Interval<T>) -> Vec<T> {
        if piece.attains_infimum() {
            return piece.infimum().into_iter().collect();
        }
        let Some(start) = sample_point(piece) else {
            return Vec::new();
        };

        let limit = piece.infimum();
        let mut chain = alloc::vec![start];
        let mut a = start;
        let mut step = a.abs() + T::one();
        for _ in 0..self.max_refinements {
            let next = match limit {
                Some(inf) => a * T::one_half() + inf * T::one_half(),
                None => a - step,
            };
            if next.is_infinite() {
                step = step * T::one_half();
                continue;
            }
            if !(next < a) || limit.is_some_and(|inf| !(next > inf)) {
                break;
            }
            chain.push(next);
            a = next;
            let doubled = step + step;
            if !doubled.is_infinite() {
                step = doubled;
            }
        }
        chain
    }
}

/// Some representable point inside a nonempty interval
fn sample_point<T: Real>(piece: &Interval<T>) -> Option<T> {
    let candidate = match (piece.infimum(), piece.supremum()) {
        (Some(lo), Some(hi)) => lo * T::one_half() + hi * T::one_half(),
        (Some(lo), None) => lo + (lo.abs() + T::one()),
        (None, Some(hi)) => hi - (hi.abs() + T::one()),
        (None, None) => T::zero(),
    };
    Some(candidate).filter(|&x| !x.is_infinite() && piece.contains(x))
}

impl<T: Real> SecondCountableCover<T> for DyadicCover {
    fn cover(&self, s: &RealSet<T>) -> Vec<(T, T)> {
        let (Some(lowest), Some(highest)) = (s.lowest_piece(), s.highest_piece()) else {
            return Vec::new();
        };
        let mut lower = self.chain_below(lowest);
        let mut upper: Vec<T> = self
            .chain_below(&highest.scale(-T::one()))
            .into_iter()
            .map(|x| -x)
            .collect();
        if lower.is_empty() {
            lower.extend(upper.first().copied());
        }
        if upper.is_empty() {
            upper.extend(lower.first().copied());
        }

        let n = lower.len().max(upper.len());
        let mut pairs = Vec::<(T, T)>::with_capacity(n);
        for i in 0..n {
            let a = lower[i.min(lower.len() - 1)];
            let b = upper[i.min(upper.len() - 1)];
            if a < b && pairs.last() != Some(&(a, b)) {
                pairs.push((a, b));
            }
        }
        pairs
    }
}

/// Which form of the a.e. statement a witness certifies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AeShape {
    /// `p` holds a.e. for the volume restricted to `s`
    Restricted,
    /// `x ∈ s → p(x)` holds a.e. for the ambient volume
    Guarded,
}

/// The outcome of [lift_ae]: `p` holds on the domain outside a null set
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "WitnessRepr<T>",
        bound(deserialize = "T: Real + serde::Deserialize<'de>")
    )
)]
pub struct GlobalAeWitness<T> {
    domain: RealSet<T>,
    cover: Vec<(T, T)>,
    uncovered: RealSet<T>,
    residual: NullSet<T>,
    exceptional: NullSet<T>,
    shape: AeShape,
}

impl<T: Real> GlobalAeWitness<T> {
    pub fn domain(&self) -> &RealSet<T> {
        &self.domain
    }

    /// The cover intervals the local obligations were discharged on
    pub fn cover(&self) -> &[(T, T)] {
        &self.cover
    }

    /// The attained extremes of the domain that no cover interval reaches
    pub fn residual(&self) -> &NullSet<T> {
        &self.residual
    }

    /// The part of the domain outside every cover interval.
    ///
    /// No obligation was asked about these points, so the witness makes no claim there.
    /// For a cover that exhausts the domain this is just the residual,
    /// plus the stretch between an unattained extreme and the last representable endpoint.
    pub fn uncovered(&self) -> &RealSet<T> {
        &self.uncovered
    }

    pub fn uncovered_volume(&self) -> ENNReal<T> {
        self.uncovered.volume()
    }

    /// Every point at which the witness makes no claim:
    /// the residual plus the exceptional points of each local obligation
    pub fn exceptional(&self) -> &NullSet<T> {
        &self.exceptional
    }

    /// Always zero; computed by summing point volumes
    pub fn exceptional_volume(&self) -> ENNReal<T> {
        self.exceptional.volume()
    }

    pub fn shape(&self) -> AeShape {
        self.shape
    }

    /// Whether the witness claims that the (possibly guarded) predicate holds at `x`
    pub fn asserts(&self, x: T) -> bool {
        let inside = self.domain.contains(x);
        let claimed = !self.uncovered.contains(x) && !self.exceptional.contains(x);
        match self.shape {
            AeShape::Restricted => inside && claimed,
            AeShape::Guarded => !inside || claimed,
        }
    }

    /// Check `p` directly at `n` evenly spaced points spanning the cover
    /// and the finite ends of the uncovered part of the domain.
    ///
    /// Returns `false` if `p` fails at any sample where the witness [asserts](Self::asserts) it.
    pub fn verify_on_samples(&self, p: impl Fn(T) -> bool, n: usize) -> bool {
        let ends = self
            .cover
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .chain(self.residual.points().iter().copied())
            .chain(
                self.uncovered
                    .pieces()
                    .iter()
                    .flat_map(|p| [p.infimum(), p.supremum()])
                    .flatten()
                    .filter(|x| !x.is_infinite()),
            );
        let Some((lo, hi)) = ends.fold(None, |hull: Option<(T, T)>, x| match hull {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min_of(x), hi.max_of(x))),
        }) else {
            return true;
        };

        let last = T::from_count(n.max(2) - 1);
        (0..n)
            .map(|k| {
                let t = T::from_count(k) / last;
                lo * (T::one() - t) + hi * t
            })
            .all(|x| !self.asserts(x) || p(x))
    }
}

/// Lift a local a.e. statement on `s` to a global one, using the default [DyadicCover].
///
/// `obligation` is called once per cover interval `(a, b)` and returns the points
/// of `s ∩ (a, b)` where the predicate may fail. Points it reports outside
/// that slice are ignored.
///
/// ```
/// use nmeasure::cover::{lift_ae, NullSet, RealSet};
/// use nmeasure::interval::Interval;
///
/// let s = RealSet::from(Interval::closed(0.0, 1.0));
/// let witness = lift_ae(&s, |_| NullSet::new(vec![0.5]));
/// assert!(witness.exceptional_volume().is_zero());
/// assert!(witness.asserts(0.25));
/// assert!(!witness.asserts(0.5));
/// ```
pub fn lift_ae<T: Real>(
    s: &RealSet<T>,
    obligation: impl FnMut(&Interval<T>) -> NullSet<T>,
) -> GlobalAeWitness<T> {
    lift_ae_with(&DyadicCover::default(), s, obligation)
}

/// [lift_ae] with the predicate guarded by membership in `s`,
/// for statements about the ambient volume rather than its restriction to `s`
pub fn lift_ae_guarded<T: Real>(
    s: &RealSet<T>,
    obligation: impl FnMut(&Interval<T>) -> NullSet<T>,
) -> GlobalAeWitness<T> {
    lift_ae_guarded_with(&DyadicCover::default(), s, obligation)
}

pub fn lift_ae_with<T: Real>(
    cover: &impl SecondCountableCover<T>,
    s: &RealSet<T>,
    obligation: impl FnMut(&Interval<T>) -> NullSet<T>,
) -> GlobalAeWitness<T> {
    lift(cover, s, obligation, AeShape::Restricted)
}

pub fn lift_ae_guarded_with<T: Real>(
    cover: &impl SecondCountableCover<T>,
    s: &RealSet<T>,
    obligation: impl FnMut(&Interval<T>) -> NullSet<T>,
) -> GlobalAeWitness<T> {
    lift(cover, s, obligation, AeShape::Guarded)
}

fn lift<T: Real>(
    cover: &impl SecondCountableCover<T>,
    s: &RealSet<T>,
    mut obligation: impl FnMut(&Interval<T>) -> NullSet<T>,
    shape: AeShape,
) -> GlobalAeWitness<T> {
    let pairs = cover.cover(s);

    let mut exceptional = NullSet::empty();
    for &(a, b) in &pairs {
        let slice = Interval::open(a, b);
        let bad = obligation(&slice).restricted(|x| slice.contains(x) && s.contains(x));
        if !bad.is_empty() {
            log::trace!("({:?}, {:?}): {} exceptional points", a, b, bad.len());
            exceptional = exceptional.union(&bad);
        }
    }

    let covered = |x: T| pairs.iter().any(|&(a, b)| a < x && x < b);
    let residual: NullSet<T> = [
        s.infimum().filter(|_| s.attains_infimum()),
        s.supremum().filter(|_| s.attains_supremum()),
    ]
    .into_iter()
    .flatten()
    .filter(|&x| !covered(x))
    .collect();
    let exceptional = exceptional.union(&residual);
    let uncovered = uncovered_part(s, &pairs);

    log::debug!(
        "lifted a.e. statement over {} cover intervals; residual {:?}, {} exceptional points, uncovered volume {:?}",
        pairs.len(),
        residual.points(),
        exceptional.len(),
        uncovered.volume()
    );

    GlobalAeWitness {
        domain: s.clone(),
        cover: pairs,
        uncovered,
        residual,
        exceptional,
        shape,
    }
}

/// The part of `s` outside every open interval in `pairs`
fn uncovered_part<T: Real>(s: &RealSet<T>, pairs: &[(T, T)]) -> RealSet<T> {
    let mut spans: Vec<(T, T)> = pairs.iter().copied().filter(|&(a, b)| a < b).collect();
    spans.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal));

    // Touching open intervals leave their shared endpoint uncovered, so only overlaps merge
    let mut merged = Vec::<(T, T)>::with_capacity(spans.len());
    for (a, b) in spans {
        if let Some(last) = merged.last_mut() {
            if a < last.1 {
                last.1 = last.1.max_of(b);
                continue;
            }
        }
        merged.push((a, b));
    }

    let mut gaps = Vec::with_capacity(merged.len() + 1);
    let mut lower = Bound::Unbounded;
    for &(a, b) in &merged {
        gaps.push(Interval::new(lower, Bound::Included(a)));
        lower = Bound::Included(b);
    }
    gaps.push(Interval::new(lower, Bound::Unbounded));

    s.pieces()
        .iter()
        .flat_map(|piece| gaps.iter().map(move |gap| piece.intersect(gap)))
        .collect()
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RealSetRepr<T> {
    pieces: Vec<Interval<T>>,
}

#[cfg(feature = "serde")]
impl<T: Real> From<RealSetRepr<T>> for RealSet<T> {
    fn from(repr: RealSetRepr<T>) -> Self {
        RealSet::new(repr.pieces)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct NullSetRepr<T> {
    points: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: Real> From<NullSetRepr<T>> for NullSet<T> {
    fn from(repr: NullSetRepr<T>) -> Self {
        NullSet::new(repr.points)
    }
}

/// A stored witness; the uncovered part is recomputed from the domain and cover
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "T: Real + serde::Deserialize<'de>"))]
struct WitnessRepr<T> {
    domain: RealSet<T>,
    cover: Vec<(T, T)>,
    residual: NullSet<T>,
    exceptional: NullSet<T>,
    shape: AeShape,
}

#[cfg(feature = "serde")]
impl<T: Real> From<WitnessRepr<T>> for GlobalAeWitness<T> {
    fn from(repr: WitnessRepr<T>) -> Self {
        GlobalAeWitness {
            uncovered: uncovered_part(&repr.domain, &repr.cover),
            exceptional: repr.exceptional.union(&repr.residual),
            domain: repr.domain,
            cover: repr.cover,
            residual: repr.residual,
            shape: repr.shape,
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use alloc::vec;

    fn set(pieces: Vec<Interval<f64>>) -> RealSet<f64> {
        RealSet::new(pieces)
    }

    #[test]
    fn test_real_set_volume_merges_overlaps() {
        let s = set(vec![
            Interval::closed(0., 1.),
            Interval::open(0.5, 2.),
            Interval::closed(3., 4.),
        ]);
        assert_eq!(s.volume(), ENNReal::of_real(3.));
        assert!(set(vec![Interval::closed(0., 1.), Interval::at_least(5.)])
            .volume()
            .is_infinite());
        assert_eq!(RealSet::<f64>::empty().volume(), ENNReal::zero());
        assert_eq!(set(vec![Interval::closed(2., 1.)]).volume(), ENNReal::zero());
    }

    #[test]
    fn test_real_set_extremes() {
        let s = set(vec![Interval::open_closed(0., 1.), Interval::closed(0., 0.5)]);
        assert_eq!(s.infimum(), Some(0.));
        assert!(s.attains_infimum());
        assert_eq!(s.supremum(), Some(1.));
        assert!(s.attains_supremum());

        let s = set(vec![Interval::open(0., 1.), Interval::closed_open(2., 3.)]);
        assert!(!s.attains_infimum());
        assert_eq!(s.supremum(), Some(3.));
        assert!(!s.attains_supremum());

        let s = set(vec![Interval::at_most(1.)]);
        assert_eq!(s.infimum(), None);
        assert!(!s.attains_infimum());
    }

    #[test]
    fn test_null_set() {
        let n = NullSet::new(vec![3., 1., f64::NAN, 3., 2.]);
        assert_eq!(n.points(), &[1., 2., 3.]);
        assert!(n.contains(2.));
        assert!(!n.contains(2.5));
        assert_eq!(n.volume(), ENNReal::zero());
        let m = n.union(&NullSet::new(vec![0., 2.]));
        assert_eq!(m.points(), &[0., 1., 2., 3.]);
    }

    #[test]
    fn test_cover_of_closed_interval() {
        let s = RealSet::from(Interval::closed(0., 1.));
        assert_eq!(DyadicCover::default().cover(&s), vec![(0., 1.)]);
    }

    #[test]
    fn test_cover_exhausts_open_interval() {
        let s = RealSet::from(Interval::open(0., 1.));
        let pairs = DyadicCover::default().cover(&s);
        assert!(pairs.len() > 1);
        for &(a, b) in &pairs {
            assert!(a < b);
            assert!(s.contains(a) && s.contains(b));
        }
        // Nested and growing
        for w in pairs.windows(2) {
            assert!(w[1].0 <= w[0].0 && w[1].1 >= w[0].1);
        }
        let &(lo, hi) = pairs.last().unwrap();
        assert!(lo > 0. && lo < 1e-300);
        assert!(hi < 1. && hi > 1. - 1e-15);
    }

    #[test]
    fn test_cover_of_unbounded_set() {
        let s: RealSet<f64> = RealSet::from(Interval::at_least(0.));
        let pairs = DyadicCover::default().cover(&s);
        let &(lo, hi) = pairs.last().unwrap();
        assert_eq!(lo, 0.);
        assert!(hi.is_finite() && hi > 1e300);
    }

    #[test]
    fn test_cover_spans_gaps() {
        let s = set(vec![Interval::closed(0., 1.), Interval::closed(2., 3.)]);
        assert_eq!(DyadicCover::default().cover(&s), vec![(0., 3.)]);
    }

    #[test]
    fn test_degenerate_covers() {
        let point = RealSet::from(Interval::point(2.));
        assert!(DyadicCover::default().cover(&point).is_empty());
        assert!(DyadicCover::default().cover(&RealSet::<f64>::empty()).is_empty());
    }

    #[test]
    fn test_max_refinements() {
        let s = RealSet::from(Interval::open(0., 1.));
        let pairs = DyadicCover::new(3).cover(&s);
        assert_eq!(pairs, vec![(0.25, 0.75), (0.125, 0.875), (0.0625, 0.9375)]);
    }

    #[test]
    fn test_trivial_lift() {
        let s = RealSet::from(Interval::closed(0., 1.));
        let w = lift_ae(&s, |_| NullSet::empty());
        assert_eq!(w.residual().points(), &[0., 1.]);
        assert_eq!(w.exceptional().points(), &[0., 1.]);
        assert!(w.exceptional_volume().is_zero());
        assert!(w.asserts(0.5));
        assert!(!w.asserts(0.));
        assert!(!w.asserts(2.));
        assert!(w.verify_on_samples(|_| true, 101));
    }

    #[test]
    fn test_lift_collects_bad_points() {
        let s = RealSet::from(Interval::closed(0., 1.));
        let p = |x: f64| x != 0.25 && x != 0.75;
        let w = lift_ae(&s, |_| NullSet::new(vec![0.25, 0.75, 5.]));
        assert_eq!(w.exceptional().points(), &[0., 0.25, 0.75, 1.]);
        assert!(w.exceptional_volume().is_zero());
        assert!(!w.asserts(0.25));
        assert!(w.verify_on_samples(p, 101));

        // An obligation that hides its bad points is caught by sampling
        let dishonest = lift_ae(&s, |_| NullSet::empty());
        assert!(!dishonest.verify_on_samples(p, 101));
    }

    #[test]
    fn test_guarded_lift() {
        let s = RealSet::from(Interval::closed(0., 1.));
        let restricted = lift_ae(&s, |_| NullSet::new(vec![0.5]));
        let guarded = lift_ae_guarded(&s, |_| NullSet::new(vec![0.5]));
        assert_eq!(restricted.exceptional(), guarded.exceptional());
        assert_eq!(guarded.shape(), AeShape::Guarded);
        assert!(!restricted.asserts(5.));
        assert!(guarded.asserts(5.));
        assert!(!guarded.asserts(0.5));
    }

    #[test]
    fn test_lift_on_open_set_has_no_residual() {
        let s = RealSet::from(Interval::open(-1., 1.));
        let mut calls = 0;
        let w = lift_ae(&s, |_| {
            calls += 1;
            NullSet::empty()
        });
        assert_eq!(calls, w.cover().len());
        assert!(w.residual().is_empty());
        assert!(w.asserts(0.));
        assert!(w.asserts(-0.999));
    }

    #[test]
    fn test_lift_on_single_point() {
        let s = RealSet::from(Interval::point(3.));
        let w = lift_ae(&s, |_| NullSet::empty());
        assert!(w.cover().is_empty());
        assert_eq!(w.residual().points(), &[3.]);
        assert!(!w.asserts(3.));
    }

    #[test]
    fn test_truncated_cover_makes_no_claim_near_the_ends() {
        let s = RealSet::from(Interval::open(0., 1.));
        let w = lift_ae_with(&DyadicCover::new(3), &s, |slice| {
            NullSet::new(vec![0.01]).restricted(|x| slice.contains(x))
        });
        assert!(w.exceptional().is_empty());
        assert_eq!(w.uncovered_volume(), ENNReal::of_real(0.125));
        assert!(w.uncovered().contains(0.01));
        assert!(!w.asserts(0.01));
        assert!(!w.asserts(0.99));
        assert!(w.asserts(0.5));
    }

    #[test]
    fn test_truncated_cover_of_a_ray() {
        let s = RealSet::from(Interval::at_least(0.));
        let w = lift_ae_with(&DyadicCover::new(3), &s, |_| NullSet::empty());
        assert!(w.uncovered_volume().is_infinite());
        assert!(w.asserts(0.5));
        assert!(!w.asserts(0.));
        assert!(!w.asserts(100.));
    }

    #[test]
    fn test_no_claim_past_the_last_representable_endpoint() {
        let s = RealSet::from(Interval::at_least(0.));
        let w = lift_ae(&s, |_| NullSet::new(vec![f64::MAX]));
        assert!(!w.asserts(f64::MAX));
        assert!(w.asserts(1.));
    }

    #[test]
    fn test_touching_cover_intervals_leave_their_endpoint_uncovered() {
        let s = RealSet::from(Interval::closed(0., 2.));
        let u = uncovered_part(&s, &[(0., 1.), (1., 2.)]);
        assert_eq!(u.pieces().len(), 3);
        assert!(u.contains(0.));
        assert!(u.contains(1.));
        assert!(u.contains(2.));
        assert!(!u.contains(0.5));
        assert!(u.volume().is_zero());
    }
}
