use segspeed_core::segment::SegmentId;
use serde::{Deserialize, Serialize};

/// a dashboard request. the hour is kept as a raw integer so that out-of-range hours
/// reach the service and are answered with an error body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionRequest {
    pub segment_id: SegmentId,
    pub hour: i64,
}

impl PredictionRequest {
    pub fn new(segment_id: SegmentId, hour: i64) -> PredictionRequest {
        PredictionRequest { segment_id, hour }
    }
}
