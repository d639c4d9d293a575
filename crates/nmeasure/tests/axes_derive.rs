use nmeasure::axes::Axes;
use nmeasure::ennreal::ENNReal;
use nmeasure::error::MeasureError;
use nmeasure::interval::Interval;
use nmeasure::linear::Matrix;
use nmeasure::measure::Volume;
use nmeasure::product::{Ball, IntervalBox};

#[derive(Axes, Clone, Copy, Debug, PartialEq)]
struct Xyz<T> {
    x: T,
    y: T,
    z: T,
}

#[derive(Axes, Clone, Debug, PartialEq)]
struct Time<T>
where
    T: Copy,
{
    t: T,
}

#[test]
fn test_round_trip() {
    let p = Xyz { x: 1., y: 2., z: 3. };
    assert_eq!(p.into_coords(), vec![1., 2., 3.]);
    assert_eq!(Xyz::from_coords(vec![1., 2., 3.]), Ok(p));
    assert_eq!(Time::from_coords(vec![4_f32]), Ok(Time { t: 4. }));
}

#[test]
fn test_names() {
    assert_eq!(<Xyz<f64> as Axes<f64>>::DIM, 3);
    assert_eq!(<Xyz<f64> as Axes<f64>>::NAMES, &["x", "y", "z"]);
    assert_eq!(<Xyz<f64> as Axes<f64>>::axis_index("y"), Some(1));
    assert_eq!(<Xyz<f64> as Axes<f64>>::axis_index("w"), None);
}

#[test]
fn test_wrong_arity() {
    assert_eq!(
        Xyz::<f64>::from_coords(vec![1., 2.]),
        Err(MeasureError::DomainMismatch {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        Xyz::<f64>::from_coords(vec![1., 2., 3., 4.]),
        Err(MeasureError::DomainMismatch {
            expected: 3,
            found: 4
        })
    );
}

#[test]
fn test_named_box_and_ball() {
    let b = IntervalBox::from_axes(Xyz {
        x: Interval::closed(0., 1.),
        y: Interval::closed(0., 2.),
        z: Interval::closed(0., 3.),
    });
    assert_eq!(b.volume(), ENNReal::of_real(6.));
    let back: Xyz<Interval<f64>> = b.into_axes().unwrap();
    assert_eq!(back.z, Interval::closed(0., 3.));

    let ball = Ball::around(Xyz { x: 0., y: 0., z: 0. }, 0.5);
    assert_eq!(ball.volume(), ENNReal::one());
}

#[test]
fn test_matrix_on_named_axes() {
    let swap_xy = Matrix::from_rows(vec![
        vec![0., 1., 0.],
        vec![1., 0., 0.],
        vec![0., 0., 1.],
    ])
    .unwrap();
    let p = swap_xy.apply_axes(Xyz { x: 1., y: 2., z: 3. }).unwrap();
    assert_eq!(p, Xyz { x: 2., y: 1., z: 3. });

    let plane = Matrix::<f64>::identity(2);
    assert_eq!(
        plane.apply_axes(Xyz { x: 1., y: 2., z: 3. }),
        Err(MeasureError::DomainMismatch {
            expected: 2,
            found: 3
        })
    );
}
