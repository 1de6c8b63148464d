use segspeed_core::segment::SegmentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("invalid simulation configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid input for segment '{0}': {1}")]
    InvalidInput(SegmentId, String),
}
