mod encoded_sample;
mod encoder_error;
mod segment_encoder;

pub(crate) use encoded_sample::features;
pub use encoded_sample::{encode_observations, EncodedSample, FEATURE_COUNT};
pub use encoder_error::EncoderError;
pub use segment_encoder::SegmentEncoder;
