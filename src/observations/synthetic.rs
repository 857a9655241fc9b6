//! # Synthetic track generation
//!
//! Generate sky-plane observations from a **known** orbit, optionally perturbed by
//! isotropic Gaussian noise. This is the test-and-demo data source: the optimizer
//! recovery tests fit tracks produced here and compare against the generating orbit,
//! and the demo programs use it to build example inputs without shipping data files.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::constants::{Observations, Year, DEFAULT_NEWTON_ITERATIONS};
use crate::observations::Observation;
use crate::orbit_type::orbit_shape::OrbitShape;
use crate::sky_plane::predict_unit_position;
use crate::skyfit_errors::SkyfitError;

/// Generate observations of `shape` at the given epochs.
///
/// Each position is the unit-scaled prediction multiplied by `semi_major_axis`,
/// plus independent Gaussian noise of standard deviation `noise_std` on both
/// coordinates (`noise_std = 0.0` produces an exact, noiseless track).
///
/// Arguments
/// ---------
/// * `shape`: the generating orbit shape.
/// * `semi_major_axis`: physical scale of the generated track.
/// * `times`: observation epochs (year-like unit).
/// * `noise_std`: standard deviation of the added position noise.
/// * `rng`: random source for the noise (unused when `noise_std` is zero).
///
/// Return
/// ------
/// * The generated [`Observations`], one per epoch, in epoch order.
pub fn synthetic_track(
    shape: &OrbitShape,
    semi_major_axis: f64,
    times: &[Year],
    noise_std: f64,
    rng: &mut impl Rng,
) -> Result<Observations, SkyfitError> {
    shape.check()?;

    let mut observations = Observations::new();
    for &t in times {
        let unit = predict_unit_position(shape, t, DEFAULT_NEWTON_ITERATIONS);
        let mut x = semi_major_axis * unit.x;
        let mut y = semi_major_axis * unit.y;
        if noise_std > 0.0 {
            let nx: f64 = rng.sample(StandardNormal);
            let ny: f64 = rng.sample(StandardNormal);
            x += noise_std * nx;
            y += noise_std * ny;
        }
        observations.push(Observation::new(t, x, y));
    }
    Ok(observations)
}
