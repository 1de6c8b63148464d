use super::Hour;
use crate::segment::SegmentId;
use serde::{Deserialize, Serialize};

/// speed observed (or simulated) on a segment at an hour of the day.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrafficObservation {
    pub segment_id: SegmentId,
    pub hour: Hour,
    #[serde(alias = "speed_kph")]
    pub speed_kmh: f64,
}

impl TrafficObservation {
    pub fn new(segment_id: SegmentId, hour: Hour, speed_kmh: f64) -> TrafficObservation {
        TrafficObservation {
            segment_id,
            hour,
            speed_kmh,
        }
    }
}
