use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrbImpactError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid propagation parameter: {0}")]
    InvalidPropagationParameter(String),

    #[error("Invalid impact parameter: {0}")]
    InvalidImpactParameter(String),

    #[error("Missing field in catalog record: {0}")]
    MissingRecordField(&'static str),

    #[error("No orbit source provided: expected explicit orbital elements or a catalog record")]
    MissingOrbitSource,

    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for OrbImpactError {
    fn eq(&self, other: &Self) -> bool {
        use OrbImpactError::*;
        match (self, other) {
            (InvalidInput(a), InvalidInput(b)) => a == b,
            (InvalidPropagationParameter(a), InvalidPropagationParameter(b)) => a == b,
            (InvalidImpactParameter(a), InvalidImpactParameter(b)) => a == b,
            (MissingRecordField(a), MissingRecordField(b)) => a == b,

            // csv::Error is not comparable: same variant means equal
            (CsvError(_), CsvError(_)) => true,

            (MissingOrbitSource, MissingOrbitSource) => true,

            _ => false,
        }
    }
}
