//! # Closed-form scale fit
//!
//! Exact one-parameter linear least squares recovering the semi-major axis from a
//! unit-scaled predicted trajectory and the observed positions: minimize
//! `Σ (xᵢ − a·pxᵢ)² + (yᵢ − a·pyᵢ)²` over the scalar `a`. The closed form is
//!
//! ```text
//! a = Σ(pxᵢ·xᵢ + pyᵢ·yᵢ) / Σ(pxᵢ² + pyᵢ²)
//! ```
//!
//! — a single accumulation pass, no iteration. The residual is then computed in a
//! second pass with the solved `a`.
//!
//! ## Negative-scale penalty
//!
//! When the solved `a` is negative, the reported residual is multiplied by a penalty
//! factor (default 100). A negative semi-major axis is geometrically meaningless —
//! the orientation angles already span the full rotation range, so a flipped sign
//! marks a degenerate mirror solution. The penalty steers the global search away from
//! that branch without hard-constraining the sign of the solve; as a consequence the
//! reported error is **not continuous at `a = 0`**. The penalized residual also feeds
//! the R² statistic, matching the fit's own objective.

use nalgebra::Vector2;

use crate::observations::{mean_position, Observation};
use crate::skyfit_errors::SkyfitError;

/// Result of the closed-form scale solve.
///
/// Fields
/// ------
/// * `semi_major_axis`: the least-squares scale `a` (unconstrained in sign).
/// * `residual`: `Σ (xᵢ − a·pxᵢ)² + (yᵢ − a·pyᵢ)²`, multiplied by the penalty
///   factor when `a < 0`.
/// * `r_squared`: `1 − residual / Σ((x̄ − xᵢ)² + (ȳ − yᵢ)²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFit {
    pub semi_major_axis: f64,
    pub residual: f64,
    pub r_squared: f64,
}

/// Solve for the optimal scale of a unit-scaled trajectory.
///
/// Arguments
/// ---------
/// * `unit_predictions`: unit-scaled predicted positions, aligned 1:1 with
///   `observations`.
/// * `observations`: the observed sky-plane positions.
/// * `negative_scale_penalty`: residual multiplier applied when the solved scale is
///   negative (the compatibility default is
///   [`DEFAULT_NEGATIVE_SCALE_PENALTY`](crate::constants::DEFAULT_NEGATIVE_SCALE_PENALTY)).
///
/// Return
/// ------
/// * `Ok(ScaleFit)` with the solved scale, residual, and R².
/// * `Err(SkyfitError::EmptyObservationSet)` on an empty track.
/// * `Err(SkyfitError::PredictionLengthMismatch)` if the buffers are misaligned.
pub fn fit_scale(
    unit_predictions: &[Vector2<f64>],
    observations: &[Observation],
    negative_scale_penalty: f64,
) -> Result<ScaleFit, SkyfitError> {
    if observations.is_empty() {
        return Err(SkyfitError::EmptyObservationSet);
    }
    if unit_predictions.len() != observations.len() {
        return Err(SkyfitError::PredictionLengthMismatch {
            predictions: unit_predictions.len(),
            observations: observations.len(),
        });
    }

    // First pass: the two running sums of the closed form.
    let mut parameter_squared = 0.0;
    let mut resultant = 0.0;
    for (prediction, obs) in unit_predictions.iter().zip(observations) {
        parameter_squared += prediction.x.powi(2) + prediction.y.powi(2);
        resultant += prediction.x * obs.x + prediction.y * obs.y;
    }
    let semi_major_axis = resultant / parameter_squared;

    // Second pass: residual with the solved scale.
    let mut residual = 0.0;
    for (prediction, obs) in unit_predictions.iter().zip(observations) {
        residual += (obs.x - semi_major_axis * prediction.x).powi(2);
        residual += (obs.y - semi_major_axis * prediction.y).powi(2);
    }

    if semi_major_axis < 0.0 {
        residual *= negative_scale_penalty;
    }

    let (mean_x, mean_y) = mean_position(observations);
    let total_variance: f64 = observations
        .iter()
        .map(|obs| (mean_x - obs.x).powi(2) + (mean_y - obs.y).powi(2))
        .sum();
    let r_squared = 1.0 - residual / total_variance;

    Ok(ScaleFit {
        semi_major_axis,
        residual,
        r_squared,
    })
}

#[cfg(test)]
mod scale_fit_test {
    use super::*;
    use crate::constants::DEFAULT_NEGATIVE_SCALE_PENALTY;
    use approx::assert_relative_eq;

    fn obs(x: f64, y: f64) -> Observation {
        Observation::new(2000.0, x, y)
    }

    #[test]
    fn test_diagonal_case_is_a_weighted_average() {
        // Uncorrelated axes: a is the squared-norm-weighted average of 2 and 3.
        let predictions = [Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)];
        let observations = [obs(2.0, 0.0), obs(0.0, 3.0)];

        let fit = fit_scale(&predictions, &observations, DEFAULT_NEGATIVE_SCALE_PENALTY).unwrap();
        assert_eq!(fit.semi_major_axis, 2.5);
        assert_relative_eq!(fit.residual, 0.5, max_relative = 1e-15);
        assert_relative_eq!(fit.r_squared, 1.0 - 0.5 / 6.5, max_relative = 1e-15);
    }

    #[test]
    fn test_exactly_proportional_observations_recover_the_scale() {
        // k = 2 keeps every product exact in binary floating point.
        let predictions = [
            Vector2::new(0.75, -0.5),
            Vector2::new(-1.25, 0.25),
            Vector2::new(0.5, 1.0),
        ];
        let observations: Vec<Observation> =
            predictions.iter().map(|p| obs(2.0 * p.x, 2.0 * p.y)).collect();

        let fit = fit_scale(&predictions, &observations, DEFAULT_NEGATIVE_SCALE_PENALTY).unwrap();
        assert_eq!(fit.semi_major_axis, 2.0);
        assert_eq!(fit.residual, 0.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_negative_scale_penalty_is_exactly_applied() {
        // Opposite-pointing observations force a < 0; the unpenalized residual is
        // 0.5, so the reported one must be exactly 100 times that.
        let predictions = [Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)];
        let observations = [obs(-2.0, 0.0), obs(0.0, -1.0)];

        let fit = fit_scale(&predictions, &observations, DEFAULT_NEGATIVE_SCALE_PENALTY).unwrap();
        assert_eq!(fit.semi_major_axis, -1.5);
        assert_relative_eq!(
            fit.residual,
            DEFAULT_NEGATIVE_SCALE_PENALTY * 0.5,
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_uncorrelated_observations_give_zero_r_squared() {
        // Predictions orthogonal to every observation: a = 0, the residual equals
        // the total variance about the mean, and R² collapses to 0.
        let predictions = [Vector2::new(0.0, 1.0), Vector2::new(0.0, 1.0)];
        let observations = [obs(1.0, 0.0), obs(-1.0, 0.0)];

        let fit = fit_scale(&predictions, &observations, DEFAULT_NEGATIVE_SCALE_PENALTY).unwrap();
        assert_eq!(fit.semi_major_axis, 0.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn test_empty_track_is_rejected() {
        let result = fit_scale(&[], &[], DEFAULT_NEGATIVE_SCALE_PENALTY);
        assert!(matches!(result, Err(SkyfitError::EmptyObservationSet)));
    }

    #[test]
    fn test_misaligned_buffers_are_rejected() {
        let predictions = [Vector2::new(1.0, 0.0)];
        let observations = [obs(1.0, 0.0), obs(2.0, 0.0)];
        let result = fit_scale(&predictions, &observations, DEFAULT_NEGATIVE_SCALE_PENALTY);
        assert!(matches!(
            result,
            Err(SkyfitError::PredictionLengthMismatch {
                predictions: 1,
                observations: 2
            })
        ));
    }
}
