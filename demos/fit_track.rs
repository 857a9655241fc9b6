//! Fit a full orbit to a sky-plane track stored as a `t,x,y` CSV file.
//!
//! Usage:
//!   fit_track <track.csv> [seed]
//! Example:
//!   cargo run --example fit_track -- tests/data/track.csv 42

use std::env;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skyfit::observations::csv_reader::observations_from_csv;
use skyfit::observations::observations_ext::OrbitFitExt;
use skyfit::orbit_fit::FitParams;
use skyfit::orbit_type::fitted_orbit::FittedOrbit;
use skyfit::skyfit_errors::SkyfitError;

/// Load a CSV track and run the global fit with default parameters.
///
/// Arguments
/// -----------------
/// * `path`: path of a headerless `t,x,y` CSV file.
/// * `seed`: RNG seed of the stochastic search.
///
/// Return
/// ----------
/// * `Ok(FittedOrbit)` — the best orbit found.
/// * `Err(SkyfitError)` — if loading or fitting fails.
fn fit_file(path: &Utf8PathBuf, seed: u64) -> Result<FittedOrbit, SkyfitError> {
    let observations = observations_from_csv(path)?;
    let params = FitParams::builder().build()?;
    let mut rng = StdRng::seed_from_u64(seed);
    observations.estimate_best_orbit(&params, &mut rng)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1).map(Utf8PathBuf::from) else {
        eprintln!("usage: fit_track <track.csv> [seed]");
        return ExitCode::FAILURE;
    };
    let seed: u64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    match fit_file(&path, seed) {
        Ok(orbit) => {
            println!("{orbit}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("orbit fit failed: {err}");
            ExitCode::FAILURE
        }
    }
}
