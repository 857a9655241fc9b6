//! # Orbit representations
//!
//! Element-set types used by the fitting engine:
//!
//! - [`orbit_shape::OrbitShape`] — the five shape angles plus period, which determine
//!   the shape and timing of an orbit but not its physical scale,
//! - [`fitted_orbit::FittedOrbit`] — a fully materialized fit: shape, derived
//!   semi-major axis, residual, R², and the unit-scaled prediction cache.

pub mod fitted_orbit;
pub mod orbit_shape;

pub use fitted_orbit::FittedOrbit;
pub use orbit_shape::OrbitShape;
