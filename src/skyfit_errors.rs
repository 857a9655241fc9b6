use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyfitError {
    #[error("Observation set is empty")]
    EmptyObservationSet,

    #[error("Eccentricity out of range [0, 1): {0}")]
    EccentricityOutOfRange(f64),

    #[error("Orbital period must be strictly positive: {0}")]
    NonPositivePeriod(f64),

    #[error("Prediction buffer length ({predictions}) does not match observation count ({observations})")]
    PredictionLengthMismatch {
        predictions: usize,
        observations: usize,
    },

    #[error("Invalid fit parameter: {0}")]
    InvalidFitParameter(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for SkyfitError {
    fn eq(&self, other: &Self) -> bool {
        use SkyfitError::*;
        match (self, other) {
            (EmptyObservationSet, EmptyObservationSet) => true,
            (EccentricityOutOfRange(a), EccentricityOutOfRange(b)) => a == b,
            (NonPositivePeriod(a), NonPositivePeriod(b)) => a == b,
            (
                PredictionLengthMismatch {
                    predictions: a,
                    observations: b,
                },
                PredictionLengthMismatch {
                    predictions: c,
                    observations: d,
                },
            ) => a == c && b == d,
            (InvalidFitParameter(a), InvalidFitParameter(b)) => a == b,

            // Wrapped errors are not comparable: equal iff same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
