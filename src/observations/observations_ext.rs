//! # High-level fitting entry point
//!
//! Extension trait putting the global orbit fit directly on the
//! [`Observations`](crate::constants::Observations) container, so callers go from a
//! loaded track to a [`FittedOrbit`] in one call:
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use skyfit::constants::Observations;
//! use skyfit::observations::observations_ext::OrbitFitExt;
//! use skyfit::observations::Observation;
//! use skyfit::orbit_fit::FitParams;
//!
//! let mut observations = Observations::new();
//! observations.push(Observation::new(2001.0, 2.4, -0.8));
//! observations.push(Observation::new(2003.5, 1.1, 1.9));
//! observations.push(Observation::new(2007.0, -2.0, 1.2));
//!
//! let params = FitParams::builder().max_generations(50).build().unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let orbit = observations.estimate_best_orbit(&params, &mut rng).unwrap();
//! println!("{orbit}");
//! ```

use rand::Rng;

use crate::constants::Observations;
use crate::orbit_fit::{estimate_best_orbit, FitParams};
use crate::orbit_type::fitted_orbit::FittedOrbit;
use crate::skyfit_errors::SkyfitError;

/// Extension trait for [`Observations`] providing the global orbit fit.
pub trait OrbitFitExt {
    /// Fit a full orbit to this track by global search.
    ///
    /// Arguments
    /// ---------
    /// * `params`: validated fit configuration.
    /// * `rng`: random source of the stochastic search; seed it for
    ///   reproducibility.
    ///
    /// Return
    /// ------
    /// * `Ok(FittedOrbit)` – the best orbit found within the search budget.
    /// * `Err(SkyfitError::EmptyObservationSet)` – on an empty track.
    ///
    /// See also
    /// ------------
    /// * [`estimate_best_orbit`] – free-function form.
    /// * [`FitParams`] – search configuration and bounds.
    fn estimate_best_orbit(
        &self,
        params: &FitParams,
        rng: &mut impl Rng,
    ) -> Result<FittedOrbit, SkyfitError>;
}

impl OrbitFitExt for Observations {
    fn estimate_best_orbit(
        &self,
        params: &FitParams,
        rng: &mut impl Rng,
    ) -> Result<FittedOrbit, SkyfitError> {
        estimate_best_orbit(self, params, rng)
    }
}
