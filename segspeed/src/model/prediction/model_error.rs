use crate::model::{encoding::EncoderError, forest::ForestError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("outside of the trained domain: {0}")]
    OutOfDomain(String),
    #[error(transparent)]
    Encoder(#[from] EncoderError),
    #[error("failure training model: {0}")]
    Forest(#[from] ForestError),
}
