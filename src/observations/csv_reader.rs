//! # CSV track loader
//!
//! External loader for sky-plane tracks stored as comma-separated text, one
//! observation per line in `t,x,y` order, without a header row.
//!
//! The fitting engine itself only consumes the in-memory
//! [`Observations`](crate::constants::Observations) sequence and is agnostic to its
//! origin; this module is the thin I/O shell supplying it. Malformed rows
//! (non-numeric fields, inconsistent width) surface as
//! [`SkyfitError::CsvError`](crate::skyfit_errors::SkyfitError::CsvError).

use std::io::Read;

use camino::Utf8Path;
use tracing::debug;

use crate::constants::Observations;
use crate::observations::Observation;
use crate::skyfit_errors::SkyfitError;

/// Read a sky-plane track from a comma-separated file.
///
/// Arguments
/// ---------
/// * `path`: path of a headerless CSV file with `t,x,y` rows.
///
/// Return
/// ------
/// * The parsed [`Observations`] in file order.
pub fn observations_from_csv(path: &Utf8Path) -> Result<Observations, SkyfitError> {
    let file = std::fs::File::open(path.as_std_path())?;
    let observations = observations_from_reader(file)?;
    debug!(
        count = observations.len(),
        path = %path,
        "loaded sky-plane track"
    );
    Ok(observations)
}

/// Read a sky-plane track from any byte source of headerless `t,x,y` rows.
///
/// Arguments
/// ---------
/// * `source`: any [`Read`] implementor yielding CSV text.
///
/// Return
/// ------
/// * The parsed [`Observations`] in source order.
pub fn observations_from_reader<R: Read>(source: R) -> Result<Observations, SkyfitError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut observations = Observations::new();
    for record in reader.deserialize() {
        let observation: Observation = record?;
        observations.push(observation);
    }
    Ok(observations)
}

#[cfg(test)]
mod csv_reader_test {
    use super::*;

    #[test]
    fn test_parse_well_formed_track() {
        let content = "2000.0,1.5,-0.25\n2001.5,-3.0,0.75\n2003.0,0.5,2.0\n";
        let observations = observations_from_reader(content.as_bytes()).unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0], Observation::new(2000.0, 1.5, -0.25));
        assert_eq!(observations[2], Observation::new(2003.0, 0.5, 2.0));
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let content = "2000.0,1.5,-0.25\n2001.5,not_a_number,0.75\n";
        let result = observations_from_reader(content.as_bytes());
        assert!(matches!(result, Err(SkyfitError::CsvError(_))));
    }

    #[test]
    fn test_inconsistent_row_width_is_an_error() {
        let content = "2000.0,1.5,-0.25\n2001.5,0.75\n";
        let result = observations_from_reader(content.as_bytes());
        assert!(matches!(result, Err(SkyfitError::CsvError(_))));
    }
}
