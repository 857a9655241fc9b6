//! # Global orbit fit
//!
//! This module drives the **nested nonlinear-then-linear** optimization that
//! recovers a full orbit from a sky-plane track:
//!
//! 1. a population-based stochastic global search
//!    ([`differential_evolution`]) explores the six bounded shape parameters
//!    (eccentricity, inclination, node, periapsis, mean anomaly at epoch, period),
//! 2. inside **every** objective evaluation, the semi-major axis is recovered
//!    exactly by the closed-form solve of [`scale_fit`](crate::scale_fit) — it is
//!    never a seventh search dimension,
//! 3. the best candidate is re-evaluated once more to materialize the final
//!    [`FittedOrbit`] (predictions, scale, residual, R²).
//!
//! ## Search space
//!
//! * eccentricity ∈ `[0, eccentricity_ceiling]` (default ceiling just below 1 —
//!   the anomaly conversion is singular at 1),
//! * inclination, node, periapsis, mean anomaly at epoch ∈ `[0, 2π]`,
//! * period ∈ `[10, 1000]` (year-like unit).
//!
//! ## Configuration
//!
//! All tunables live in [`FitParams`], built through a validating fluent builder:
//!
//! ```rust
//! use skyfit::orbit_fit::FitParams;
//!
//! let params = FitParams::builder()
//!     .population_size(120)
//!     .max_generations(1500)
//!     .convergence_tol(1e-3)
//!     .build()
//!     .unwrap();
//! ```
//!
//! The defaults mirror the established reference configuration of this fit: a
//! population of 15 candidates per dimension, dithered mutation in `[0.5, 1)`,
//! crossover probability 0.7, relative convergence tolerance 0.01, 6 Newton steps
//! per Kepler solve, and the 100× negative-scale penalty.
//!
//! ## See also
//!
//! * [`OrbitFitExt`](crate::observations::observations_ext::OrbitFitExt) – the
//!   high-level entry point on [`Observations`].
//! * [`DifferentialEvolution`] – the underlying bounded global minimizer.

pub mod differential_evolution;

use std::cmp::Ordering::{Equal, Greater, Less};

use rand::Rng;
use tracing::info;

use crate::constants::{
    Observations, DEFAULT_NEGATIVE_SCALE_PENALTY, DEFAULT_NEWTON_ITERATIONS, DPI,
    MAX_SEARCH_ECCENTRICITY, PERIOD_SEARCH_BOUNDS,
};
use crate::orbit_type::fitted_orbit::FittedOrbit;
use crate::orbit_type::orbit_shape::OrbitShape;
use crate::scale_fit::fit_scale;
use crate::sky_plane::predict_unit_positions;
use crate::skyfit_errors::SkyfitError;

pub use differential_evolution::{DifferentialEvolution, SearchOutcome};

/// Configuration parameters controlling the behavior of
/// [`estimate_best_orbit`].
///
/// Fields
/// -----------------
/// **Global search**
/// * `population_size` – number of candidate vectors kept alive per generation.
/// * `max_generations` – generation budget of the search.
/// * `mutation` – dithering interval of the mutation factor, redrawn once per
///   generation.
/// * `crossover_probability` – binomial crossover probability.
/// * `convergence_tol` – relative population-spread tolerance of the stop test.
///
/// **Engine numerics**
/// * `newton_iterations` – fixed Newton step count of every Kepler solve.
/// * `negative_scale_penalty` – residual multiplier for negative fitted scales.
///
/// **Search bounds**
/// * `eccentricity_ceiling` – upper end of the eccentricity interval, strictly
///   below 1.
/// * `period_bounds` – `(min, max)` of the period interval.
///
/// Defaults
/// -----------------
/// ```rust
/// use skyfit::orbit_fit::FitParams;
/// let params = FitParams::default();
/// ```
///
/// * `population_size`: 90 (15 per search dimension)
/// * `max_generations`: 1000
/// * `mutation`: (0.5, 1.0)
/// * `crossover_probability`: 0.7
/// * `convergence_tol`: 0.01
/// * `newton_iterations`: 6
/// * `negative_scale_penalty`: 100.0
/// * `eccentricity_ceiling`: 1 − 1e−9
/// * `period_bounds`: (10.0, 1000.0)
#[derive(Debug, Clone)]
pub struct FitParams {
    // --- Global search ---
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation: (f64, f64),
    pub crossover_probability: f64,
    pub convergence_tol: f64,

    // --- Engine numerics ---
    /// Fixed Newton step count of every Kepler solve.
    pub newton_iterations: usize,
    /// Residual multiplier applied when the fitted semi-major axis is negative.
    pub negative_scale_penalty: f64,

    // --- Search bounds ---
    /// Upper end of the eccentricity search interval, strictly below 1.
    pub eccentricity_ceiling: f64,
    /// Bounds of the period search interval (year-like unit).
    pub period_bounds: (f64, f64),
}

impl FitParams {
    /// Construct a new [`FitParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`FitParamsBuilder`] to configure custom parameters.
    pub fn builder() -> FitParamsBuilder {
        FitParamsBuilder::new()
    }

    /// The six `(lower, upper)` intervals of the shape-parameter search box, in
    /// candidate-vector order: e, i, Ω, ω, M₀, p.
    pub(crate) fn search_bounds(&self) -> [(f64, f64); 6] {
        [
            (0.0, self.eccentricity_ceiling),
            (0.0, DPI),
            (0.0, DPI),
            (0.0, DPI),
            (0.0, DPI),
            self.period_bounds,
        ]
    }
}

impl Default for FitParams {
    fn default() -> Self {
        FitParams {
            population_size: 90,
            max_generations: 1000,
            mutation: (0.5, 1.0),
            crossover_probability: 0.7,
            convergence_tol: 0.01,

            newton_iterations: DEFAULT_NEWTON_ITERATIONS,
            negative_scale_penalty: DEFAULT_NEGATIVE_SCALE_PENALTY,

            eccentricity_ceiling: MAX_SEARCH_ECCENTRICITY,
            period_bounds: PERIOD_SEARCH_BOUNDS,
        }
    }
}

/// Builder for [`FitParams`], with validation.
#[derive(Debug, Clone)]
pub struct FitParamsBuilder {
    params: FitParams,
}

impl Default for FitParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FitParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: FitParams::default(),
        }
    }

    // --- Global search ---
    pub fn population_size(mut self, v: usize) -> Self {
        self.params.population_size = v;
        self
    }
    pub fn max_generations(mut self, v: usize) -> Self {
        self.params.max_generations = v;
        self
    }
    pub fn mutation(mut self, v: (f64, f64)) -> Self {
        self.params.mutation = v;
        self
    }
    pub fn crossover_probability(mut self, v: f64) -> Self {
        self.params.crossover_probability = v;
        self
    }
    pub fn convergence_tol(mut self, v: f64) -> Self {
        self.params.convergence_tol = v;
        self
    }

    // --- Engine numerics ---
    pub fn newton_iterations(mut self, v: usize) -> Self {
        self.params.newton_iterations = v;
        self
    }
    pub fn negative_scale_penalty(mut self, v: f64) -> Self {
        self.params.negative_scale_penalty = v;
        self
    }

    // --- Search bounds ---
    pub fn eccentricity_ceiling(mut self, v: f64) -> Self {
        self.params.eccentricity_ceiling = v;
        self
    }
    pub fn period_bounds(mut self, v: (f64, f64)) -> Self {
        self.params.period_bounds = v;
        self
    }

    // ---- Numeric helpers for PartialOrd (handle NaN as invalid) ----

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Return true iff a < b and comparable (i.e., not NaN).
    #[inline]
    fn lt(a: f64, b: f64) -> bool {
        a.partial_cmp(&b) == Some(Less)
    }

    /// Return true iff a <= b and comparable (i.e., not NaN).
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
    }

    /// Finalize the builder and produce a [`FitParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `population_size ≥ 5` – the best/1/bin mutation needs four distinct
    ///   members besides the current one.
    /// * `max_generations ≥ 1`.
    /// * `0 ≤ mutation.0 < mutation.1 ≤ 2` – dithering interval must be ordered
    ///   and non-degenerate.
    /// * `crossover_probability ∈ [0, 1]`.
    /// * `convergence_tol ≥ 0`.
    /// * `newton_iterations ≥ 1`.
    /// * `negative_scale_penalty ≥ 1` – the penalty must not reward a flipped sign.
    /// * `0 < eccentricity_ceiling < 1` – the anomaly conversion is singular at 1.
    /// * `0 < period_bounds.0 ≤ period_bounds.1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(FitParams)` if all values are valid.
    /// * `Err(SkyfitError::InvalidFitParameter)` naming the failing rule.
    pub fn build(self) -> Result<FitParams, SkyfitError> {
        let p = &self.params;

        if p.population_size < 5 {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "population_size must be at least 5, got {}",
                p.population_size
            )));
        }
        if p.max_generations == 0 {
            return Err(SkyfitError::InvalidFitParameter(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(Self::ge0(p.mutation.0) && Self::lt(p.mutation.0, p.mutation.1) && Self::le(p.mutation.1, 2.0))
        {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "mutation interval must satisfy 0 <= lo < hi <= 2, got ({}, {})",
                p.mutation.0, p.mutation.1
            )));
        }
        if !(Self::ge0(p.crossover_probability) && Self::le(p.crossover_probability, 1.0)) {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "crossover_probability must be in [0, 1], got {}",
                p.crossover_probability
            )));
        }
        if !Self::ge0(p.convergence_tol) {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "convergence_tol must be non-negative, got {}",
                p.convergence_tol
            )));
        }
        if p.newton_iterations == 0 {
            return Err(SkyfitError::InvalidFitParameter(
                "newton_iterations must be at least 1".into(),
            ));
        }
        if !Self::le(1.0, p.negative_scale_penalty) {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "negative_scale_penalty must be at least 1, got {}",
                p.negative_scale_penalty
            )));
        }
        if !(Self::gt0(p.eccentricity_ceiling) && Self::lt(p.eccentricity_ceiling, 1.0)) {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "eccentricity_ceiling must be in (0, 1), got {}",
                p.eccentricity_ceiling
            )));
        }
        if !(Self::gt0(p.period_bounds.0) && Self::le(p.period_bounds.0, p.period_bounds.1)) {
            return Err(SkyfitError::InvalidFitParameter(format!(
                "period_bounds must satisfy 0 < min <= max, got ({}, {})",
                p.period_bounds.0, p.period_bounds.1
            )));
        }

        Ok(self.params)
    }
}

/// Fit a full orbit to a sky-plane track by global search.
///
/// For every candidate shape vector, the unit-scaled trajectory is predicted, the
/// semi-major axis recovered by the closed-form solve, and the (possibly
/// penalized) residual returned as the scalar loss. The best candidate is then
/// re-evaluated once to materialize the final [`FittedOrbit`].
///
/// Arguments
/// ---------
/// * `observations`: the observed track (must be non-empty).
/// * `params`: validated fit configuration.
/// * `rng`: random source of the stochastic search; seed it for reproducibility.
///
/// Return
/// ------
/// * `Ok(FittedOrbit)` – the best orbit found within the search budget.
/// * `Err(SkyfitError::EmptyObservationSet)` – on an empty track.
///
/// See also
/// ------------
/// * [`OrbitFitExt::estimate_best_orbit`](crate::observations::observations_ext::OrbitFitExt::estimate_best_orbit) – trait-method form.
/// * [`FitParams`] – search configuration and bounds.
pub fn estimate_best_orbit(
    observations: &Observations,
    params: &FitParams,
    rng: &mut impl Rng,
) -> Result<FittedOrbit, SkyfitError> {
    if observations.is_empty() {
        return Err(SkyfitError::EmptyObservationSet);
    }

    let bounds = params.search_bounds();
    let objective = |candidate: &[f64]| -> f64 {
        let shape = OrbitShape::from_candidate(candidate);
        let predictions = predict_unit_positions(&shape, observations, params.newton_iterations);
        match fit_scale(&predictions, observations, params.negative_scale_penalty) {
            Ok(scale) => scale.residual,
            // Unreachable once the track is known non-empty; an infinite loss
            // simply removes the candidate from contention.
            Err(_) => f64::INFINITY,
        }
    };

    let search = DifferentialEvolution {
        bounds: &bounds,
        population_size: params.population_size,
        max_generations: params.max_generations,
        mutation: params.mutation,
        crossover_probability: params.crossover_probability,
        convergence_tol: params.convergence_tol,
    };
    let outcome = search.minimize(objective, rng);

    // One more full pass on the winning candidate materializes the orbit.
    let shape = OrbitShape::from_candidate(&outcome.best_candidate);
    let predictions = predict_unit_positions(&shape, observations, params.newton_iterations);
    let scale = fit_scale(&predictions, observations, params.negative_scale_penalty)?;

    info!(
        generations = outcome.generations,
        converged = outcome.converged,
        residual = scale.residual,
        r_squared = scale.r_squared,
        "orbit fit finished"
    );

    Ok(FittedOrbit {
        shape,
        semi_major_axis: scale.semi_major_axis,
        residual: scale.residual,
        r_squared: scale.r_squared,
        predicted_unit_positions: predictions,
    })
}

#[cfg(test)]
mod fit_params_test {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = FitParams::builder().build().unwrap();
        assert_eq!(params.population_size, 90);
        assert_eq!(params.newton_iterations, DEFAULT_NEWTON_ITERATIONS);
        assert_eq!(params.negative_scale_penalty, DEFAULT_NEGATIVE_SCALE_PENALTY);
    }

    #[test]
    fn test_builder_overrides() {
        let params = FitParams::builder()
            .population_size(30)
            .max_generations(250)
            .convergence_tol(1e-4)
            .period_bounds((20.0, 80.0))
            .build()
            .unwrap();
        assert_eq!(params.population_size, 30);
        assert_eq!(params.max_generations, 250);
        assert_eq!(params.period_bounds, (20.0, 80.0));
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(FitParams::builder().population_size(2).build().is_err());
        assert!(FitParams::builder().max_generations(0).build().is_err());
        assert!(FitParams::builder().mutation((1.0, 0.5)).build().is_err());
        assert!(FitParams::builder().crossover_probability(1.5).build().is_err());
        assert!(FitParams::builder().convergence_tol(-1.0).build().is_err());
        assert!(FitParams::builder().newton_iterations(0).build().is_err());
        assert!(FitParams::builder().negative_scale_penalty(0.5).build().is_err());
        assert!(FitParams::builder().eccentricity_ceiling(1.0).build().is_err());
        assert!(FitParams::builder().period_bounds((-5.0, 10.0)).build().is_err());
        assert!(FitParams::builder().convergence_tol(f64::NAN).build().is_err());
    }

    #[test]
    fn test_search_bounds_follow_configuration() {
        let params = FitParams::builder()
            .eccentricity_ceiling(0.8)
            .period_bounds((15.0, 120.0))
            .build()
            .unwrap();
        let bounds = params.search_bounds();
        assert_eq!(bounds[0], (0.0, 0.8));
        assert_eq!(bounds[1], (0.0, DPI));
        assert_eq!(bounds[5], (15.0, 120.0));
    }

    #[test]
    fn test_empty_track_is_rejected() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let observations = Observations::new();
        let params = FitParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let result = estimate_best_orbit(&observations, &params, &mut rng);
        assert!(matches!(result, Err(SkyfitError::EmptyObservationSet)));
    }
}
