//! read-only prediction façade consumed by the dashboard. a [`PredictionService`] is
//! loaded once and then shared across request handlers without locking.
mod congestion_level;
mod prediction_error;
mod prediction_request;
mod prediction_response;
mod prediction_service;
mod service_error;
mod speed_prediction;

pub use congestion_level::CongestionLevel;
pub use prediction_error::PredictionError;
pub use prediction_request::PredictionRequest;
pub use prediction_response::{
    ErrorBody, PredictionFailure, PredictionResponse, PredictionSuccess, SegmentBody,
};
pub use prediction_service::PredictionService;
pub use service_error::ServiceError;
pub use speed_prediction::SpeedPrediction;
