//! # skyfit
//!
//! Estimate the six classical Keplerian orbital elements of a body from a sparse,
//! noisy time series of its projected two-dimensional sky-plane position.
//!
//! The engine is a nested nonlinear-then-linear fit: a bounded differential-evolution
//! search over the five shape parameters plus period, with the semi-major axis
//! recovered exactly inside every objective evaluation by a closed-form linear
//! least-squares solve.

pub mod constants;
pub mod kepler;
pub mod observations;
pub mod orbit_fit;
pub mod orbit_type;
pub mod scale_fit;
pub mod sky_plane;
pub mod skyfit_errors;
