use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForestError {
    #[error("invalid forest configuration: {0}")]
    InvalidConfiguration(String),
    #[error("cannot fit a forest without training samples")]
    EmptyTrainingSet,
    #[error("feature rows ({0}) and targets ({1}) differ in length")]
    LengthMismatch(usize, usize),
    #[error("training sample {0} has a non-finite feature or target")]
    NonFiniteSample(usize),
}
