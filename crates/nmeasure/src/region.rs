//! The region between two graphs, and the integrals that size it
//!
//! The region between `f` and `g` over `s` is the set of `(x, y)` with `x ∈ s`
//! and `f(x) < y < g(x)`.
//! For each fixed `x` its vertical slice is the open interval `(f(x), g(x))`,
//! whose length is `max(0, g(x) - f(x))`,
//! so by Fubini the area of the region is the integral of that slice length over `s`.
//! Where `f(x) >= g(x)` the slice is empty and contributes nothing,
//! so crossing graphs need no special treatment.
//!
//! Integration itself is delegated to an [IntegrationEngine],
//! which also fixes the base measure on the `x` axis.
//! [Quadrature] integrates against Lebesgue measure on a bounded domain;
//! [AtomicMeasure] integrates against a finite sum of weighted point masses.

use alloc::vec::Vec;

use crate::ennreal::ENNReal;
use crate::error::{MeasureError, Result};
use crate::interval::Interval;
use crate::measure::Volume;
use crate::scalar::*;

/// Integrates real-valued functions against a base measure on the real line
pub trait IntegrationEngine<T: Real> {
    /// The lower Lebesgue integral of the positive part of `f` over `domain`,
    /// i.e. `∫⁻ max(f, 0) dμ`.
    ///
    /// Fails with [NotMeasurable](MeasureError::NotMeasurable)
    /// if `f` is undefined (NaN) anywhere the engine needs to evaluate it.
    fn lintegral(&self, f: &dyn Fn(T) -> T, domain: &Interval<T>) -> Result<ENNReal<T>>;

    /// The integral of `f` over `domain`, clamped into the extended nonnegative reals.
    ///
    /// This is `∫ f⁺ - ∫ f⁻` with truncated subtraction.
    /// When both parts are infinite the integral is undefined and this returns zero.
    fn integrate(&self, f: &dyn Fn(T) -> T, domain: &Interval<T>) -> Result<ENNReal<T>> {
        let positive = self.lintegral(f, domain)?;
        let negative = self.lintegral(&|x| -f(x), domain)?;
        Ok(positive - negative)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadratureRule {
    /// Composite trapezoid rule; exact for piecewise-linear integrands whose kinks fall on nodes
    #[default]
    Trapezoid,
    /// Composite midpoint rule; never evaluates the domain endpoints
    Midpoint,
    /// Composite Simpson rule; the panel count is rounded up to an even number
    Simpson,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadratureConfig {
    pub rule: QuadratureRule,
    /// Number of equal-width panels the domain is split into
    pub panels: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        QuadratureConfig {
            rule: QuadratureRule::Trapezoid,
            panels: 1024,
        }
    }
}

/// Numerical integration against Lebesgue measure
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quadrature {
    config: QuadratureConfig,
}

impl Quadrature {
    pub fn new(config: QuadratureConfig) -> Self {
        Quadrature { config }
    }

    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    fn nodes<T: Real>(&self, lo: T, hi: T) -> Vec<(T, T)> {
        let mut n = self.config.panels.max(1);
        if self.config.rule == QuadratureRule::Simpson && n % 2 == 1 {
            n += 1;
        }
        let width = hi - lo;
        let h = width / T::from_count(n);
        // Nodes are placed by fraction of the width so that e.g. the midpoint lands exactly
        let at = |k: usize| lo + width * (T::from_count(k) / T::from_count(n));

        match self.config.rule {
            QuadratureRule::Trapezoid => (0..=n)
                .map(|k| {
                    let w = if k == 0 || k == n { h * T::one_half() } else { h };
                    (at(k), w)
                })
                .collect(),
            QuadratureRule::Midpoint => (0..n)
                .map(|k| {
                    let x = lo + width * ((T::from_count(k) + T::one_half()) / T::from_count(n));
                    (x, h)
                })
                .collect(),
            QuadratureRule::Simpson => {
                let third = h * T::one_third();
                (0..=n)
                    .map(|k| {
                        let w = if k == 0 || k == n {
                            third
                        } else if k % 2 == 1 {
                            third * T::from_integer(4)
                        } else {
                            third * T::from_integer(2)
                        };
                        (at(k), w)
                    })
                    .collect()
            }
        }
    }
}

impl<T: Real> IntegrationEngine<T> for Quadrature {
    fn lintegral(&self, f: &dyn Fn(T) -> T, domain: &Interval<T>) -> Result<ENNReal<T>> {
        if domain.is_empty() {
            return Ok(ENNReal::zero());
        }
        let (Some(lo), Some(hi)) = (domain.infimum(), domain.supremum()) else {
            return Err(MeasureError::UnboundedDomain);
        };
        if lo.is_infinite() || hi.is_infinite() {
            return Err(MeasureError::UnboundedDomain);
        }
        let nodes = self.nodes(lo, hi);
        log::trace!(
            "{:?} quadrature over [{:?}, {:?}] with {} nodes",
            self.config.rule,
            lo,
            hi,
            nodes.len()
        );
        weighted_sum(f, nodes.into_iter())
    }
}

/// A finite sum of weighted point masses, `μ = Σ wᵢ δ(xᵢ)`
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomicMeasure<T> {
    atoms: Vec<(T, T)>,
}

impl<T: Real> AtomicMeasure<T> {
    pub fn new() -> Self {
        AtomicMeasure { atoms: Vec::new() }
    }

    /// Add a point mass of the given weight; negative weights are clamped to zero.
    pub fn with_atom(mut self, at: T, weight: T) -> Self {
        self.atoms.push((at, weight.max_of(T::zero())));
        self
    }

    pub fn atoms(&self) -> &[(T, T)] {
        &self.atoms
    }

    /// The measure of a set of the line
    pub fn measure_of(&self, set: &Interval<T>) -> ENNReal<T> {
        self.atoms
            .iter()
            .filter(|(x, _)| set.contains(*x))
            .map(|&(_, w)| ENNReal::of_real(w))
            .sum()
    }
}

impl<T: Real> IntegrationEngine<T> for AtomicMeasure<T> {
    fn lintegral(&self, f: &dyn Fn(T) -> T, domain: &Interval<T>) -> Result<ENNReal<T>> {
        weighted_sum(
            f,
            self.atoms
                .iter()
                .copied()
                .filter(|&(x, _)| domain.contains(x)),
        )
    }
}

fn weighted_sum<T: Real>(
    f: &dyn Fn(T) -> T,
    nodes: impl Iterator<Item = (T, T)>,
) -> Result<ENNReal<T>> {
    let mut total = ENNReal::zero();
    for (x, w) in nodes {
        let y = f(x);
        if y.is_nan() {
            log::debug!("integrand is undefined at {:?}", x);
            return Err(MeasureError::NotMeasurable {
                reason: "integrand is undefined at a sample point",
            });
        }
        total += ENNReal::of_real(y).smul(w);
    }
    Ok(total)
}

/// The set `{(x, y) : x ∈ domain, f(x) < y < g(x)}`
pub struct RegionBetween<T, F, G> {
    f: F,
    g: G,
    domain: Interval<T>,
}

impl<T: Real, F: Fn(T) -> T, G: Fn(T) -> T> RegionBetween<T, F, G> {
    pub fn new(f: F, g: G, domain: Interval<T>) -> Self {
        RegionBetween { f, g, domain }
    }

    pub fn domain(&self) -> &Interval<T> {
        &self.domain
    }

    /// The vertical slice above `x`, i.e. the open interval `(f(x), g(x))`
    pub fn slice(&self, x: T) -> Interval<T> {
        if self.domain.contains(x) {
            Interval::open((self.f)(x), (self.g)(x))
        } else {
            Interval::empty()
        }
    }

    pub fn contains(&self, x: T, y: T) -> bool {
        self.slice(x).contains(y)
    }

    /// The length of the slice above `x` as a scalar, with an infinite length
    /// becoming the scalar's infinity and an undefined one staying NaN
    fn slice_length(&self, x: T) -> T {
        let gap = (self.g)(x) - (self.f)(x);
        if gap.is_nan() {
            return gap;
        }
        let length = self.slice(x).volume();
        if length.is_infinite() {
            T::infinity()
        } else {
            length.to_real()
        }
    }

    /// The area of the region, where `engine` provides the measure along `x`
    pub fn volume(&self, engine: &impl IntegrationEngine<T>) -> Result<ENNReal<T>> {
        engine.lintegral(&|x| self.slice_length(x), &self.domain)
    }
}

/// The area between the graphs of `f` and `g` over `domain`,
/// measured by `engine` along `x` and by length along `y`.
///
/// Wherever `f(x) >= g(x)` the region is empty above `x`.
///
/// ```
/// use nmeasure::interval::Interval;
/// use nmeasure::region::{region_between_volume, Quadrature};
///
/// let area = region_between_volume(|_| 0.0, |_| 1.0, Interval::closed(0.0, 2.0), &Quadrature::default());
/// assert_eq!(area.unwrap().to_finite().unwrap(), 2.0);
/// ```
pub fn region_between_volume<T: Real>(
    f: impl Fn(T) -> T,
    g: impl Fn(T) -> T,
    domain: Interval<T>,
    engine: &impl IntegrationEngine<T>,
) -> Result<ENNReal<T>> {
    RegionBetween::new(f, g, domain).volume(engine)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn approx(v: ENNReal<f64>, expected: f64) {
        let v = v.to_finite().unwrap();
        assert!((v - expected).abs() < 1e-9, "{} !~= {}", v, expected);
    }

    #[test]
    fn test_constant_gap() {
        let q = Quadrature::default();
        approx(
            region_between_volume(|_| 0., |_| 1., Interval::closed(0., 2.), &q).unwrap(),
            2.,
        );
    }

    #[test]
    fn test_crossing_graphs() {
        // The slice is empty on [0, 1], so only the triangle over [-1, 0] counts
        let q = Quadrature::default();
        approx(
            region_between_volume(|x| x, |_| 0., Interval::closed(-1., 1.), &q).unwrap(),
            0.5,
        );
    }

    #[test]
    fn test_rules_agree_on_parabola() {
        for rule in [
            QuadratureRule::Trapezoid,
            QuadratureRule::Midpoint,
            QuadratureRule::Simpson,
        ] {
            let q = Quadrature::new(QuadratureConfig { rule, panels: 2000 });
            let area =
                region_between_volume(|x| x * x, |_| 1., Interval::closed(-1., 1.), &q).unwrap();
            let area = area.to_finite().unwrap();
            assert!((area - 4. / 3.).abs() < 1e-5, "{:?}: {}", rule, area);
        }
    }

    #[test]
    fn test_integrate_matches_region_when_ordered() {
        let q = Quadrature::default();
        let f = |x: f64| x;
        let g = |x: f64| 2. * x + 1.;
        let domain = Interval::closed(0., 1.);
        let region = region_between_volume(f, g, domain, &q).unwrap();
        let direct = q.integrate(&|x| g(x) - f(x), &domain).unwrap();
        approx(region, direct.to_finite().unwrap());
        approx(region, 1.5);
    }

    #[test]
    fn test_integrate_clamps_negative() {
        let q = Quadrature::default();
        let v = q.integrate(&|x: f64| x, &Interval::closed(-2., 1.)).unwrap();
        assert_eq!(v, ENNReal::zero());
    }

    #[test]
    fn test_unbounded_domain() {
        let q = Quadrature::default();
        assert_eq!(
            region_between_volume(|_| 0., |_| 1., Interval::at_least(0.), &q),
            Err(MeasureError::UnboundedDomain)
        );
    }

    #[test]
    fn test_infinite_endpoint_is_unbounded() {
        let q = Quadrature::default();
        assert_eq!(
            region_between_volume(
                |x| x,
                |x| x + 1.,
                Interval::closed(f64::NEG_INFINITY, 0.),
                &q
            ),
            Err(MeasureError::UnboundedDomain)
        );
        assert_eq!(
            q.lintegral(&|_| 1., &Interval::closed(0., f64::INFINITY)),
            Err(MeasureError::UnboundedDomain)
        );
    }

    #[test]
    fn test_undefined_integrand() {
        let q = Quadrature::default();
        let r = region_between_volume(|x: f64| x.ln(), |_| 1., Interval::closed(-1., 1.), &q);
        assert!(matches!(r, Err(MeasureError::NotMeasurable { .. })));
    }

    #[test]
    fn test_infinite_slice() {
        let q = Quadrature::new(QuadratureConfig {
            rule: QuadratureRule::Midpoint,
            panels: 4,
        });
        let r = region_between_volume(|_| f64::NEG_INFINITY, |_| 0., Interval::closed(0., 1.), &q);
        assert!(r.unwrap().is_infinite());
    }

    #[test]
    fn test_empty_domain() {
        let q = Quadrature::default();
        assert_eq!(
            region_between_volume(|_| 0., |_| 1., Interval::open(1., 1.), &q),
            Ok(ENNReal::zero())
        );
    }

    #[test]
    fn test_atomic_base_measure() {
        let mu = AtomicMeasure::new()
            .with_atom(0., 2.)
            .with_atom(1., 0.5)
            .with_atom(5., 10.);
        // Atoms at 0 and 1 lie in the domain: 2 * (1 - 0) + 0.5 * (3 - 1)
        let area = region_between_volume(|x| x, |x| 1. + 2. * x, Interval::closed(0., 2.), &mu);
        approx(area.unwrap(), 3.);
        approx(mu.measure_of(&Interval::closed(0., 1.)), 2.5);
    }

    #[test]
    fn test_region_membership() {
        let r = RegionBetween::new(|_| 0., |x: f64| x, Interval::closed(0., 1.));
        assert!(r.contains(0.5, 0.25));
        assert!(!r.contains(0.5, 0.75));
        assert!(!r.contains(2., 1.));
        assert_eq!(r.slice(0.5), Interval::open(0., 0.5));
    }
}
