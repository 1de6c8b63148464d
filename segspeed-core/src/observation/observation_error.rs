use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservationError {
    #[error("hour must be in [0, 23], found {0}")]
    InvalidHour(i64),
    #[error("unable to parse hour '{0}', expected an integer or 'HH:00'")]
    InvalidHourFormat(String),
    #[error("row {row}: duplicate observation for segment '{segment_id}' at {hour}, first seen at row {first_row}")]
    DuplicateObservation {
        row: usize,
        first_row: usize,
        segment_id: String,
        hour: String,
    },
    #[error("segment '{segment_id}' has {count} hourly observations, expected {expected}")]
    IncompleteCoverage {
        segment_id: String,
        count: usize,
        expected: usize,
    },
    #[error("failure reading observations from {0}: {1}")]
    ReadError(String, String),
    #[error("failure writing observations to {0}: {1}")]
    WriteError(String, String),
}
