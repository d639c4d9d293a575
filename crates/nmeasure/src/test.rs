#![cfg(all(test, feature = "std"))]

use crate::axes::Axes;
use crate::cover::{lift_ae, NullSet, RealSet};
use crate::ennreal::ENNReal;
use crate::interval::Interval;
use crate::linear::{linear_scaling_factor, pushforward_volume, DiagonalMap, Matrix, Transvection};
use crate::measure::{volume, Volume};
use crate::product::{ball_volume, Ball, IntervalBox};
use crate::region::{region_between_volume, Quadrature, QuadratureConfig, QuadratureRule};

macro_rules! assert_close {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                assert!(
                    (*left_val).is_close(*right_val),
                    "{:?} !~= {:?}",
                    left_val,
                    right_val
                );
            }
        }
    };
}

trait IsClose {
    fn is_close(self, rhs: Self) -> bool;
}

impl IsClose for f64 {
    fn is_close(self, rhs: f64) -> bool {
        (self - rhs).abs() < 1e-9
    }
}

impl IsClose for ENNReal<f64> {
    fn is_close(self, rhs: Self) -> bool {
        match (self.to_finite(), rhs.to_finite()) {
            (Ok(a), Ok(b)) => a.is_close(b),
            (Err(_), Err(_)) => true,
            _ => false,
        }
    }
}

fn fin(x: f64) -> ENNReal<f64> {
    ENNReal::of_real(x)
}

#[derive(Axes, Clone, Copy, Debug, PartialEq)]
struct Plane<T> {
    x: T,
    y: T,
}

#[test]
fn test_volume_of_each_shape() {
    // Points have no volume; rays and the line have infinite volume
    assert_eq!(volume(&Interval::point(3.)), ENNReal::zero());
    assert!(volume(&Interval::<f64>::line()).is_infinite());
    assert!(volume(&Interval::less_than(0.)).is_infinite());

    let b = IntervalBox::from_axes(Plane {
        x: Interval::closed(0., 2.),
        y: Interval::open(0., 1.5),
    });
    assert_close!(volume(&b), fin(3.));
    assert_close!(volume(&Ball::closed(vec![0.; 3], 1.)), ball_volume(3, 1.));
}

#[test]
fn test_scaling_law_matches_one_by_one_factor() {
    // volume(a·I) = |a|·volume(I), and the 1×1 matrix [a] sizes preimages by 1/|a|
    let i = Interval::closed_open(-1., 2.);
    for a in [3., -0.5, 8.] {
        assert_close!(i.scale(a).volume(), i.volume().smul(f64::abs(a)));
        let m = Matrix::diagonal(&[a]);
        assert_close!(
            pushforward_volume(&m, &i).unwrap(),
            i.preimage_scale(a).volume()
        );
    }
}

#[test]
fn test_shear_fibers_preserve_box_volume() {
    // Summing fiber lengths along the sheared axis reproduces the box volume
    let b = IntervalBox::new(vec![Interval::closed(0., 1.), Interval::closed(0., 2.)]);
    let t = Transvection::new(2, 0, 1, 4.).unwrap();
    let n = 400;
    let dy = 2. / n as f64;
    let sheared: ENNReal<f64> = (0..n)
        .map(|k| {
            let y = (k as f64 + 0.5) * dy;
            t.fiber(&b, &[0., y]).unwrap().volume().smul(dy)
        })
        .sum();
    assert_close!(sheared, b.volume());
    assert_eq!(linear_scaling_factor(&t.to_matrix()), Ok(ENNReal::one()));
}

#[test]
fn test_linear_map_on_named_axes() {
    let m = Matrix::from_rows(vec![vec![2., 1.], vec![0., 1.]]).unwrap();
    let p = m.apply_axes(Plane { x: 1., y: 3. }).unwrap();
    assert_eq!(p, Plane { x: 5., y: 3. });

    // A unit square pulled back through m has half its volume
    let square = IntervalBox::cube(2, Interval::closed(0., 1.));
    assert_close!(pushforward_volume(&m, &square).unwrap(), fin(0.5));

    // Cross-check the diagonal part against an explicit preimage box
    let d = DiagonalMap::new(vec![2., 1.]);
    assert_close!(d.preimage_box(&square).unwrap().volume(), fin(0.5));
}

#[test]
fn test_region_between_examples() {
    let q = Quadrature::default();
    assert_close!(
        region_between_volume(|_| 0., |_| 1., Interval::closed(0., 2.), &q).unwrap(),
        fin(2.)
    );
    assert_close!(
        region_between_volume(|x| x, |_| 0., Interval::closed(-1., 1.), &q).unwrap(),
        fin(0.5)
    );

    // Area under a half period of sin is 2
    let simpson = Quadrature::new(QuadratureConfig {
        rule: QuadratureRule::Simpson,
        panels: 256,
    });
    assert_close!(
        region_between_volume(
            |_| 0.,
            f64::sin,
            Interval::closed(0., core::f64::consts::PI),
            &simpson
        )
        .unwrap(),
        fin(2.)
    );
}

#[test]
fn test_lift_ae_agrees_with_sampling() {
    // p holds everywhere, so the witness holds on all of s except at most its extremes
    let s: RealSet<f64> = [Interval::closed(0., 1.), Interval::open(2., 3.)]
        .into_iter()
        .collect();
    let w = lift_ae(&s, |_| NullSet::empty());
    assert!(w.exceptional_volume().is_zero());
    assert_eq!(w.residual().points(), &[0.]);
    assert!(w.verify_on_samples(|_| true, 1000));
    for x in [0.5, 1., 2.5, 2.9999] {
        assert!(w.asserts(x), "{} should be asserted", x);
    }
    assert!(!w.asserts(1.5));
    assert_close!(s.volume(), fin(2.));
}
