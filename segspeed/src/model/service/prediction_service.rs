use super::{
    CongestionLevel, PredictionError, PredictionRequest, PredictionResponse, ServiceError,
    SpeedPrediction,
};
use crate::model::prediction::TrainedModel;
use segspeed_core::{
    observation::Hour,
    segment::{SegmentCatalog, SegmentId},
};
use std::path::Path;

/// combines the segment catalog with a trained model and its encoder. immutable after
/// construction, so one instance can serve concurrent requests through `&self` or an
/// `Arc`.
#[derive(Debug)]
pub struct PredictionService {
    catalog: SegmentCatalog,
    model: TrainedModel,
}

impl PredictionService {
    pub fn new(catalog: SegmentCatalog, model: TrainedModel) -> PredictionService {
        let unknown = catalog
            .ids()
            .filter(|id| !model.encoder().contains(id))
            .count();
        if unknown > 0 {
            log::warn!(
                "{} of {} catalog segments were not part of model training and cannot be predicted",
                unknown,
                catalog.len()
            );
        }
        PredictionService { catalog, model }
    }

    /// loads the catalog and the paired model artifacts.
    ///
    /// # Arguments
    ///
    /// * `catalog_path` - segment catalog CSV
    /// * `model_path` - model JSON written by training
    /// * `encoder_path` - encoder JSON written alongside the model
    pub fn load(
        catalog_path: &Path,
        model_path: &Path,
        encoder_path: &Path,
    ) -> Result<PredictionService, ServiceError> {
        let catalog = SegmentCatalog::from_csv(catalog_path)?;
        let model = TrainedModel::load_pair(model_path, encoder_path)?;
        Ok(PredictionService::new(catalog, model))
    }

    /// predicts the speed of a segment at an hour. the segment must be in the catalog
    /// and must have been known to the encoder at training time.
    pub fn predict_for(
        &self,
        segment_id: &SegmentId,
        hour: i64,
    ) -> Result<SpeedPrediction<'_>, PredictionError> {
        let segment = self.catalog.find(segment_id)?;
        let code = self.model.encoder().encode(segment_id)?;
        let speed_kmh = self.model.model().predict(code, hour)?;
        let hour = Hour::try_from(hour).map_err(|e| PredictionError::InvalidInput(e.to_string()))?;
        Ok(SpeedPrediction {
            speed_kmh,
            hour,
            congestion: CongestionLevel::from_speed(speed_kmh),
            segment,
        })
    }

    /// answers a request, turning any failure into an error response.
    pub fn handle(&self, request: &PredictionRequest) -> PredictionResponse {
        match self.predict_for(&request.segment_id, request.hour) {
            Ok(prediction) => PredictionResponse::success(&prediction),
            Err(e) => {
                log::debug!("request for {} failed: {}", request.segment_id, e);
                PredictionResponse::failure(request.segment_id.clone(), request.hour, &e)
            }
        }
    }

    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }
}
