//! # Constants and type definitions for skyfit
//!
//! This module centralizes the **numeric constants**, **default tunables**, and **common type
//! definitions** used throughout the `skyfit` library. It also defines the container type
//! used to hold sky-plane observations.
//!
//! ## Overview
//!
//! - Angular constants and the reference epoch of the time axis
//! - Default values for the tunable knobs of the fitting engine
//! - Core type aliases used across the crate
//! - The observation container type
//!
//! These definitions are used by all main modules, including the Kepler solver, the sky-plane
//! projection, and the global orbit search.

use crate::observations::Observation;
use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Angular constants and reference epoch
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Epoch zero of the time axis (observation times are expressed in a year-like
/// unit; the mean anomaly at epoch refers to this instant)
pub const EPOCH_YEAR: f64 = 2000.0;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// Default tunables of the fitting engine
// -------------------------------------------------------------------------------------------------

/// Default number of Newton-Raphson steps when solving Kepler's equation.
///
/// The solver runs a fixed number of steps with no convergence-based early exit,
/// trading bounded cost for approximate accuracy.
pub const DEFAULT_NEWTON_ITERATIONS: usize = 6;

/// Default multiplier applied to the residual when the fitted semi-major axis is
/// negative. A negative scale is a degenerate mirror solution; the penalty steers
/// the global search away from it without constraining the sign of the solve.
pub const DEFAULT_NEGATIVE_SCALE_PENALTY: f64 = 100.0;

/// Default ceiling of the eccentricity search interval.
///
/// The anomaly conversion is singular at e = 1, so the search stays strictly below it.
pub const MAX_SEARCH_ECCENTRICITY: f64 = 1.0 - 1e-9;

/// Default bounds of the orbital period search interval (year-like unit).
pub const PERIOD_SEARCH_BOUNDS: (f64, f64) = (10.0, 1000.0);

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;

/// Time on the observation axis (year-like unit, epoch at [`EPOCH_YEAR`])
pub type Year = f64;

/// A set of sky-plane observations of a single body.
///
/// Backed by a [`SmallVec`] so short tracks stay on the stack.
pub type Observations = SmallVec<[Observation; 8]>;
