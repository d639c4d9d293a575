//! nmeasure demo
//!
//! Prints a few volumes. Run with `RUST_LOG=debug` to see the decompositions and covers.

use nmeasure::cover::{lift_ae, NullSet, RealSet};
use nmeasure::error::Result;
use nmeasure::interval::Interval;
use nmeasure::linear::Matrix;
use nmeasure::measure::Volume;
use nmeasure::product::{ball_volume, IntervalBox};
use nmeasure::region::{Quadrature, QuadratureConfig, QuadratureRule};
use nmeasure::{linear_scaling_factor, pushforward_volume, region_between_volume};

fn main() -> Result<()> {
    {
        let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                "debug".to_owned()
            } else {
                "info".to_owned()
            }
        });
        std::env::set_var("RUST_LOG", rust_log);
    }

    env_logger::init(); // Log to stderr

    let b = IntervalBox::new(vec![
        Interval::closed(0., 2.),
        Interval::open(-1., 1.),
        Interval::at_least(0.),
    ]);
    log::info!("volume of {:?} is {}", b.axes(), b.volume());
    log::info!("unit ball in 4 dimensions has volume {}", ball_volume(4, 1_f64));

    let m = Matrix::from_rows(vec![
        vec![2., 0., 1.],
        vec![1., 3., 2.],
        vec![1., 1., 4.],
    ])?;
    log::info!("scaling factor of {:?} is {}", m, linear_scaling_factor(&m)?);
    let cube = IntervalBox::cube(3, Interval::closed(0., 1.));
    log::info!("its preimage of the unit cube has volume {}", pushforward_volume(&m, &cube)?);

    let simpson = Quadrature::new(QuadratureConfig {
        rule: QuadratureRule::Simpson,
        ..Default::default()
    });
    let area = region_between_volume(
        |x: f64| x * x,
        |x| x.sqrt(),
        Interval::closed(0., 1.),
        &simpson,
    )?;
    log::info!("area between x² and √x on [0, 1] is {}", area);

    let s: RealSet<f64> = [Interval::closed(0., 1.), Interval::open(2., 3.)]
        .into_iter()
        .collect();
    let witness = lift_ae(&s, |_| NullSet::new(vec![0.5]));
    log::info!(
        "a.e. witness on {:?}: {} cover intervals, exceptional points {:?} (volume {})",
        s.pieces(),
        witness.cover().len(),
        witness.exceptional().points(),
        witness.exceptional_volume()
    );

    Ok(())
}
