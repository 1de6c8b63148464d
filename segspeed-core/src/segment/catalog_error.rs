use thiserror::Error;

use super::SegmentId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failure reading segment catalog {0}: {1}")]
    ReadError(String, String),
    #[error("invalid segment catalog row {row}: {message}")]
    InvalidRow { row: usize, message: String },
    #[error("invalid road segment '{0}': {1}")]
    InvalidSegment(SegmentId, String),
    #[error("segment '{0}' not found in catalog")]
    NotFound(SegmentId),
}
