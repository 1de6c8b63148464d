use super::CongestionLevel;
use segspeed_core::{observation::Hour, segment::RoadSegment};

/// a predicted speed paired with the segment it belongs to.
#[derive(Clone, Debug)]
pub struct SpeedPrediction<'a> {
    pub speed_kmh: f64,
    pub hour: Hour,
    pub congestion: CongestionLevel,
    pub segment: &'a RoadSegment,
}
