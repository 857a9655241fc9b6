use camino::Utf8Path;

use skyfit::observations::csv_reader::observations_from_csv;
use skyfit::observations::Observation;
use skyfit::skyfit_errors::SkyfitError;

#[test]
fn test_load_track_from_csv_file() {
    let path = Utf8Path::new("tests/data/track.csv");
    let observations = observations_from_csv(path).unwrap();

    assert_eq!(observations.len(), 7);
    assert_eq!(observations[0], Observation::new(2001.72, 2.371, -4.379));
    assert_eq!(observations[6], Observation::new(2022.08, -1.934, -4.565));

    // File order is preserved; the loader performs no sorting.
    for pair in observations.windows(2) {
        assert!(pair[0].time < pair[1].time);
    }
}

#[test]
fn test_missing_file_is_an_io_error() {
    let path = Utf8Path::new("tests/data/does_not_exist.csv");
    let result = observations_from_csv(path);
    assert!(matches!(result, Err(SkyfitError::IoError(_))));
}
