//! Evaluate a fixed orbit shape against a sky-plane track: derive the semi-major
//! axis by the closed-form solve and report the residual and R², without running
//! the global search.
//!
//! Usage:
//!   evaluate_orbit <track.csv> [e i node periapsis m0 period]
//! Example:
//!   cargo run --example evaluate_orbit -- tests/data/track.csv 0.33 0.66 3.55 0.4 5.97 40

use std::env;
use std::process::ExitCode;

use camino::Utf8PathBuf;

use skyfit::constants::{DEFAULT_NEGATIVE_SCALE_PENALTY, DEFAULT_NEWTON_ITERATIONS};
use skyfit::observations::csv_reader::observations_from_csv;
use skyfit::orbit_type::orbit_shape::OrbitShape;
use skyfit::scale_fit::{fit_scale, ScaleFit};
use skyfit::sky_plane::predict_unit_positions;
use skyfit::skyfit_errors::SkyfitError;

/// Derive the scale of a fixed shape over a loaded track.
fn evaluate(path: &Utf8PathBuf, shape: &OrbitShape) -> Result<ScaleFit, SkyfitError> {
    let observations = observations_from_csv(path)?;
    let predictions = predict_unit_positions(shape, &observations, DEFAULT_NEWTON_ITERATIONS);
    fit_scale(&predictions, &observations, DEFAULT_NEGATIVE_SCALE_PENALTY)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1).map(Utf8PathBuf::from) else {
        eprintln!("usage: evaluate_orbit <track.csv> [e i node periapsis m0 period]");
        return ExitCode::FAILURE;
    };

    let mut values = [0.33, 0.66, 3.55, 0.4, 5.97, 40.0];
    for (slot, arg) in values.iter_mut().zip(args.iter().skip(2)) {
        match arg.parse() {
            Ok(v) => *slot = v,
            Err(_) => {
                eprintln!("not a number: {arg}");
                return ExitCode::FAILURE;
            }
        }
    }

    let shape = match OrbitShape::new(
        values[0], values[1], values[2], values[3], values[4], values[5],
    ) {
        Ok(shape) => shape,
        Err(err) => {
            eprintln!("invalid orbit shape: {err}");
            return ExitCode::FAILURE;
        }
    };

    match evaluate(&path, &shape) {
        Ok(fit) => {
            println!("Fixed-shape evaluation");
            println!("-------------------------------------------");
            println!("{shape}");
            println!("  a   (derived scale)         = {:.6}", fit.semi_major_axis);
            println!("  residual (Σ squared)        = {:.6e}", fit.residual);
            println!("  R²                          = {:.6}", fit.r_squared);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("evaluation failed: {err}");
            ExitCode::FAILURE
        }
    }
}
