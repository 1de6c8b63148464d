use super::{EncoderError, SegmentEncoder};
use segspeed_core::observation::{Hour, TrafficObservation};
use serde::{Deserialize, Serialize};

/// number of model features: segment code and hour.
pub const FEATURE_COUNT: usize = 2;

/// a training sample: encoded segment identity, hour, and target speed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct EncodedSample {
    pub segment_code: usize,
    pub hour: Hour,
    pub speed: f64,
}

impl EncodedSample {
    pub fn new(segment_code: usize, hour: Hour, speed: f64) -> EncodedSample {
        EncodedSample {
            segment_code,
            hour,
            speed,
        }
    }

    /// feature vector in model order: [segment_code, hour].
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        features(self.segment_code, self.hour)
    }
}

pub(crate) fn features(segment_code: usize, hour: Hour) -> [f64; FEATURE_COUNT] {
    [segment_code as f64, hour.value() as f64]
}

/// encodes an observation table with a fitted encoder. fails on the first observation
/// whose segment was not seen when fitting.
pub fn encode_observations(
    encoder: &SegmentEncoder,
    observations: &[TrafficObservation],
) -> Result<Vec<EncodedSample>, EncoderError> {
    observations
        .iter()
        .map(|obs| {
            let code = encoder.encode(&obs.segment_id)?;
            Ok(EncodedSample::new(code, obs.hour, obs.speed_kmh))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use segspeed_core::segment::SegmentId;

    #[test]
    fn test_encode_observations() {
        let observations = vec![
            TrafficObservation::new(SegmentId::from("b"), Hour::try_from(3).unwrap(), 48.0),
            TrafficObservation::new(SegmentId::from("a"), Hour::try_from(8).unwrap(), 17.0),
            TrafficObservation::new(SegmentId::from("b"), Hour::try_from(8).unwrap(), 19.0),
        ];
        let encoder = SegmentEncoder::fit(observations.iter().map(|o| &o.segment_id));
        let samples = encode_observations(&encoder, &observations).unwrap();
        assert_eq!(samples[0], EncodedSample::new(0, Hour::try_from(3).unwrap(), 48.0));
        assert_eq!(samples[1].segment_code, 1);
        assert_eq!(samples[2].features(), [0.0, 8.0]);
    }

    #[test]
    fn test_unseen_segment_fails() {
        let encoder = SegmentEncoder::fit(&vec![SegmentId::from("a")]);
        let observations = vec![TrafficObservation::new(
            SegmentId::from("z"),
            Hour::MIDNIGHT,
            40.0,
        )];
        assert!(matches!(
            encode_observations(&encoder, &observations),
            Err(EncoderError::UnknownSegment(_))
        ));
    }
}
