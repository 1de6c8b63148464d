use crate::model::{encoding::EncoderError, prediction::ModelError};
use segspeed_core::segment::{CatalogError, SegmentId};
use thiserror::Error;

/// a failed precondition of a prediction request. every internal failure on the serving
/// path is reduced to one of these kinds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("segment '{0}' is unknown to the model, the catalog has changed since training")]
    UnknownSegment(SegmentId),
    #[error("model and encoder do not match: {0}")]
    ArtifactMismatch(String),
    #[error("segment '{0}' not found in catalog")]
    NotFound(SegmentId),
    #[error("outside of the trained domain: {0}")]
    OutOfDomain(String),
}

impl PredictionError {
    /// stable name of the error kind for response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::InvalidInput(_) => "invalid_input",
            PredictionError::UnknownSegment(_) => "unknown_segment",
            PredictionError::ArtifactMismatch(_) => "artifact_mismatch",
            PredictionError::NotFound(_) => "not_found",
            PredictionError::OutOfDomain(_) => "out_of_domain",
        }
    }
}

impl From<ModelError> for PredictionError {
    fn from(value: ModelError) -> Self {
        match value {
            ModelError::InvalidInput(msg) => PredictionError::InvalidInput(msg),
            ModelError::OutOfDomain(msg) => PredictionError::OutOfDomain(msg),
            ModelError::Encoder(e) => PredictionError::from(e),
            ModelError::Forest(e) => PredictionError::InvalidInput(e.to_string()),
        }
    }
}

impl From<EncoderError> for PredictionError {
    fn from(value: EncoderError) -> Self {
        match value {
            EncoderError::UnknownSegment(id) => PredictionError::UnknownSegment(id),
            e @ EncoderError::InvalidCode { .. } => PredictionError::OutOfDomain(e.to_string()),
            e @ EncoderError::CorruptEncoder(_) => {
                PredictionError::ArtifactMismatch(e.to_string())
            }
        }
    }
}

impl From<CatalogError> for PredictionError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::NotFound(id) => PredictionError::NotFound(id),
            other => PredictionError::InvalidInput(other.to_string()),
        }
    }
}
