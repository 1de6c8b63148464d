use super::{PredictionError, SpeedPrediction};
use segspeed_core::segment::SegmentId;
use serde::{Deserialize, Serialize};

/// the JSON answer to a [`super::PredictionRequest`]. a success carries the speed and the
/// segment metadata needed to draw it; a failure carries the error kind and a message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum PredictionResponse {
    Success(PredictionSuccess),
    Failure(PredictionFailure),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionSuccess {
    pub segment_id: SegmentId,
    pub hour: i64,
    pub speed_kmh: f64,
    pub congestion: String,
    pub color: String,
    pub segment: SegmentBody,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SegmentBody {
    pub name: Option<String>,
    pub display_name: String,
    pub length_m: f64,
    /// (lat, lon) pairs in road order
    pub points: Vec<(f64, f64)>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionFailure {
    pub segment_id: SegmentId,
    pub hour: i64,
    pub error: ErrorBody,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl PredictionResponse {
    pub fn success(prediction: &SpeedPrediction<'_>) -> PredictionResponse {
        let segment = prediction.segment;
        PredictionResponse::Success(PredictionSuccess {
            segment_id: segment.id.clone(),
            hour: prediction.hour.value() as i64,
            speed_kmh: prediction.speed_kmh,
            congestion: prediction.congestion.to_string(),
            color: prediction.congestion.color().to_string(),
            segment: SegmentBody {
                name: segment.name.clone(),
                display_name: segment.display_name(),
                length_m: segment.length_m,
                points: segment.points(),
            },
        })
    }

    pub fn failure(segment_id: SegmentId, hour: i64, error: &PredictionError) -> PredictionResponse {
        PredictionResponse::Failure(PredictionFailure {
            segment_id,
            hour,
            error: ErrorBody {
                kind: error.kind().to_string(),
                message: error.to_string(),
            },
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResponse::Success(_))
    }
}
