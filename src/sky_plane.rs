//! # Sky-plane projection of an orbit shape
//!
//! This module maps an [`OrbitShape`] and an observation epoch to the **unit-scaled**
//! predicted sky-plane position of the body. The physical scale (semi-major axis) is
//! deliberately absent: it is recovered afterwards by the exact linear solve in
//! [`scale_fit`](crate::scale_fit), so every prediction here lives on the unit orbit.
//!
//! ## Projection convention
//!
//! The composition is, in order:
//!
//! 1. scaled radius `r = 1 − e·cos(E)`,
//! 2. in-plane rotation by the periapsis argument: `(cos(ν + ω), sin(ν + ω))`,
//! 3. node rotation offset by a fixed `3π/2` phase: `(cos(Ω − 3π/2), sin(Ω − 3π/2))`,
//! 4. inclination applied as a single `cos(i)` scaling of the out-of-plane-projected
//!    component.
//!
//! This is a simplified 2-D sky-plane projection, not a full 3-D rotation matrix.
//! The least-squares scale solve is sensitive to the exact geometric convention, so
//! the composition below must not be reordered or algebraically "simplified".
//!
//! Every function here is pure: repeated calls with identical inputs produce
//! bit-identical outputs, and batch prediction allocates its own output buffer, which
//! keeps concurrent candidate evaluations of the global search independent.

use nalgebra::Vector2;

use crate::constants::Year;
use crate::kepler::{solve_eccentric_anomaly, true_anomaly};
use crate::observations::Observation;
use crate::orbit_type::orbit_shape::OrbitShape;

/// Unit-scaled predicted sky-plane position of `shape` at time `t`.
///
/// Arguments
/// ---------
/// * `shape`: the orbit shape parameters.
/// * `t`: the observation epoch (year-like unit).
/// * `newton_iterations`: fixed Newton step count for the Kepler solve.
///
/// Return
/// ------
/// * The unit-scaled `(x, y)` prediction.
pub fn predict_unit_position(shape: &OrbitShape, t: Year, newton_iterations: usize) -> Vector2<f64> {
    let mean_anomaly = shape.mean_anomaly(t);
    let eccentric_anomaly =
        solve_eccentric_anomaly(shape.eccentricity, mean_anomaly, newton_iterations);
    let nu = true_anomaly(shape.beta(), eccentric_anomaly);

    let radius_scaled = 1.0 - shape.eccentricity * eccentric_anomaly.cos();

    let planar_angle = nu + shape.periapsis_argument;
    let (planar_sin, planar_cos) = planar_angle.sin_cos();

    let node_angle = shape.ascending_node_longitude - 3.0 * std::f64::consts::PI / 2.0;
    let (node_sin, node_cos) = node_angle.sin_cos();

    let inclined = shape.inclination.cos();

    let x = radius_scaled * (planar_cos * node_cos - inclined * planar_sin * node_sin);
    let y = radius_scaled * (inclined * planar_sin * node_cos + planar_cos * node_sin);

    Vector2::new(x, y)
}

/// Unit-scaled predictions for a whole track, one per observation, in observation
/// order.
///
/// The returned buffer is aligned 1:1 with `observations`; the scale solve and the
/// residual computation both rely on that pairing.
pub fn predict_unit_positions(
    shape: &OrbitShape,
    observations: &[Observation],
    newton_iterations: usize,
) -> Vec<Vector2<f64>> {
    observations
        .iter()
        .map(|obs| predict_unit_position(shape, obs.time, newton_iterations))
        .collect()
}

#[cfg(test)]
mod sky_plane_test {
    use super::*;
    use crate::constants::{DEFAULT_NEWTON_ITERATIONS, EPOCH_YEAR};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sample_shape() -> OrbitShape {
        OrbitShape::new(0.33, 0.66, 3.55, 0.4, 5.97, 40.0).unwrap()
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let shape = sample_shape();
        let first = predict_unit_position(&shape, 2010.25, DEFAULT_NEWTON_ITERATIONS);
        let second = predict_unit_position(&shape, 2010.25, DEFAULT_NEWTON_ITERATIONS);
        // Pure function: bit-identical outputs for identical inputs.
        assert_eq!(first, second);
    }

    #[test]
    fn test_face_on_circular_orbit_stays_on_unit_circle() {
        // e = 0 and i = 0: the scaled radius is exactly 1 and the projection is a
        // plain rotation, so every prediction lies on the unit circle.
        let shape = OrbitShape::new(0.0, 0.0, 1.2, 0.7, 0.3, 25.0).unwrap();
        for k in 0..10 {
            let t = EPOCH_YEAR + 2.5 * k as f64;
            let pos = predict_unit_position(&shape, t, DEFAULT_NEWTON_ITERATIONS);
            assert_relative_eq!(pos.norm(), 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_prediction_is_periodic() {
        let shape = sample_shape();
        let early = predict_unit_position(&shape, 2003.0, DEFAULT_NEWTON_ITERATIONS);
        let late =
            predict_unit_position(&shape, 2003.0 + shape.period, DEFAULT_NEWTON_ITERATIONS);
        assert_relative_eq!(early.x, late.x, epsilon = 1e-9);
        assert_relative_eq!(early.y, late.y, epsilon = 1e-9);
    }

    #[test]
    fn test_edge_on_orbit_collapses_to_node_line() {
        // i = π/2 zeroes the cos(i) factor: predictions collapse onto the direction
        // (cos(Ω − 3π/2), sin(Ω − 3π/2)), whatever the epoch.
        let shape = OrbitShape::new(0.2, PI / 2.0, 2.1, 0.9, 1.4, 60.0).unwrap();
        let node_angle = shape.ascending_node_longitude - 3.0 * PI / 2.0;
        let (node_sin, node_cos) = node_angle.sin_cos();
        for k in 0..8 {
            let t = EPOCH_YEAR + 7.0 * k as f64;
            let pos = predict_unit_position(&shape, t, DEFAULT_NEWTON_ITERATIONS);
            let cross = pos.x * node_sin - pos.y * node_cos;
            assert_relative_eq!(cross, 0.0, epsilon = 1e-12);
        }
    }
}
