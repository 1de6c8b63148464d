use super::AppError;
use crate::model::service::{PredictionRequest, PredictionResponse, PredictionService};
use segspeed_core::segment::SegmentId;
use std::path::Path;

/// answers a single request. request failures are part of the response, only startup
/// failures are errors.
pub fn run(
    segments_file: &Path,
    model_file: &Path,
    encoder_file: &Path,
    segment_id: &str,
    hour: i64,
) -> Result<PredictionResponse, AppError> {
    let service = PredictionService::load(segments_file, model_file, encoder_file)?;
    let request = PredictionRequest::new(SegmentId::from(segment_id), hour);
    Ok(service.handle(&request))
}
