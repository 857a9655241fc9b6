//! # Fitted orbit
//!
//! This module defines [`FittedOrbit`]: the result of a completed fit. It bundles the
//! [`OrbitShape`] with the **derived** semi-major axis, the residual and R² of the
//! solve, and the per-observation unit-scaled predictions the scale was derived from.
//!
//! ## Lifecycle
//!
//! A `FittedOrbit` is created at fit time and never mutated. Its prediction cache is
//! valid only for the exact observation set it was fit against; fitting the same
//! shape against a different set produces a fresh `FittedOrbit`, never a patched one.
//!
//! The semi-major axis may be **negative**: the least-squares solve is unconstrained
//! in sign, and a negative scale marks a degenerate mirror solution. The global
//! search penalizes (without forbidding) such solutions, so a negative value in a
//! final result signals a poorly constrained track.

use std::fmt;

use nalgebra::Vector2;

use crate::orbit_type::orbit_shape::OrbitShape;

/// A fully materialized orbit fit.
///
/// Fields
/// ------
/// * `shape`: the fitted shape parameters (five angles + period).
/// * `semi_major_axis`: the least-squares scale factor (may be negative).
/// * `residual`: total squared position residual of the fit, including the
///   negative-scale penalty when it applies.
/// * `r_squared`: coefficient of determination against the 2-D position variance.
/// * `predicted_unit_positions`: unit-scaled predictions, one per observation,
///   in observation order.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedOrbit {
    pub shape: OrbitShape,
    pub semi_major_axis: f64,
    pub residual: f64,
    pub r_squared: f64,
    pub predicted_unit_positions: Vec<Vector2<f64>>,
}

impl FittedOrbit {
    /// Physically scaled predicted positions, in observation order.
    pub fn predicted_positions(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.predicted_unit_positions
            .iter()
            .map(|unit| unit * self.semi_major_axis)
    }
}

impl fmt::Display for FittedOrbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fitted orbit")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6}",
            self.semi_major_axis
        )?;
        writeln!(f, "{}", self.shape)?;
        writeln!(f, "  residual (Σ squared)        = {:.6e}", self.residual)?;
        write!(f, "  R²                          = {:.6}", self.r_squared)
    }
}
