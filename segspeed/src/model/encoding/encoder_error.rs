use segspeed_core::segment::SegmentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("segment '{0}' was not seen when the encoder was fitted")]
    UnknownSegment(SegmentId),
    #[error("segment code {code} is out of range for an encoder with {size} segments")]
    InvalidCode { code: usize, size: usize },
    #[error("stored encoder is corrupt: {0}")]
    CorruptEncoder(String),
}
