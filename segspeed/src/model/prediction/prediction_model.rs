use super::{ModelError, ModelMetadata, MODEL_FORMAT_VERSION};
use crate::model::{
    encoding::{self, EncodedSample, SegmentEncoder, FEATURE_COUNT},
    forest::{ForestConfig, RandomForest},
};
use chrono::Utc;
use segspeed_core::observation::Hour;
use serde::{Deserialize, Serialize};

/// a random forest regressing speed on (segment code, hour), with the metadata that ties
/// it to the encoder it was trained against.
///
/// predictions reject inputs outside the trained domain rather than clamping them: an
/// hour outside [0, 23] is [`ModelError::InvalidInput`] and a segment code the encoder
/// never produced is [`ModelError::OutOfDomain`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PredictionModel {
    metadata: ModelMetadata,
    forest: RandomForest,
}

impl PredictionModel {
    /// fits a model on samples encoded with `encoder`.
    ///
    /// # Arguments
    ///
    /// * `samples` - encoded training samples
    /// * `encoder` - encoder that produced the sample codes
    /// * `config` - forest hyperparameters
    ///
    /// # Returns
    ///
    /// * the trained model, or an error if a sample code is unknown to the encoder or the
    ///   forest cannot be fitted
    pub fn train(
        samples: &[EncodedSample],
        encoder: &SegmentEncoder,
        config: &ForestConfig,
    ) -> Result<PredictionModel, ModelError> {
        if let Some(bad) = samples.iter().find(|s| s.segment_code >= encoder.len()) {
            return Err(ModelError::InvalidInput(format!(
                "sample segment code {} is out of range for an encoder with {} segments",
                bad.segment_code,
                encoder.len()
            )));
        }
        let x: Vec<[f64; FEATURE_COUNT]> = samples.iter().map(|s| s.features()).collect();
        let y: Vec<f64> = samples.iter().map(|s| s.speed).collect();
        let forest = RandomForest::fit(&x, &y, config)?;
        let metadata = ModelMetadata {
            format_version: MODEL_FORMAT_VERSION,
            encoder_fingerprint: encoder.fingerprint().to_string(),
            segment_count: encoder.len(),
            sample_count: samples.len(),
            hyperparameters: config.clone(),
            trained_at: Utc::now().to_rfc3339(),
            mean_absolute_error: None,
        };
        log::info!(
            "trained model on {} samples across {} segments",
            metadata.sample_count,
            metadata.segment_count
        );
        Ok(PredictionModel { metadata, forest })
    }

    /// predicted speed in km/h. the same model and arguments always give the same value.
    pub fn predict(&self, segment_code: usize, hour: i64) -> Result<f64, ModelError> {
        let hour = Hour::try_from(hour).map_err(|e| ModelError::InvalidInput(e.to_string()))?;
        self.predict_hour(segment_code, hour)
    }

    pub fn predict_hour(&self, segment_code: usize, hour: Hour) -> Result<f64, ModelError> {
        if segment_code >= self.metadata.segment_count {
            return Err(ModelError::OutOfDomain(format!(
                "segment code {} but the model was trained on {} segments",
                segment_code, self.metadata.segment_count
            )));
        }
        let row = encoding::features(segment_code, hour);
        Ok(self.forest.predict(&row))
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub(crate) fn set_mean_absolute_error(&mut self, mae: f64) {
        self.metadata.mean_absolute_error = Some(mae);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        encoding::encode_observations,
        simulation::{SimulationConfig, TrafficSimulator},
    };
    use geo::line_string;
    use segspeed_core::segment::{RoadSegment, SegmentCatalog, SegmentId};

    fn single_segment_catalog() -> SegmentCatalog {
        let geometry = line_string![(x: -105.0, y: 39.75), (x: -105.0059, y: 39.75)];
        let segment = RoadSegment::new(
            SegmentId::from("seg_1"),
            Some(String::from("Main Street")),
            500.0,
            geometry,
            None,
        )
        .unwrap();
        SegmentCatalog::new(vec![segment])
    }

    fn train_scenario() -> (SegmentEncoder, PredictionModel) {
        let catalog = single_segment_catalog();
        let simulator = TrafficSimulator::new(SimulationConfig::default()).unwrap();
        let observations = simulator.simulate_day(&catalog, Some(42)).unwrap();
        let encoder = SegmentEncoder::fit(observations.iter().map(|o| &o.segment_id));
        let samples = encode_observations(&encoder, &observations).unwrap();
        let model = PredictionModel::train(&samples, &encoder, &ForestConfig::default()).unwrap();
        (encoder, model)
    }

    #[test]
    fn test_single_segment_scenario() {
        let (encoder, model) = train_scenario();
        assert_eq!(encoder.encode(&SegmentId::from("seg_1")).unwrap(), 0);
        let rush = model.predict(0, 8).unwrap();
        let night = model.predict(0, 3).unwrap();
        assert!(rush <= night, "rush {rush} night {night}");
        assert_eq!(model.metadata().segment_count, 1);
        assert_eq!(model.metadata().sample_count, 24);
    }

    #[test]
    fn test_inference_is_deterministic() {
        let (_, model) = train_scenario();
        for hour in 0..24 {
            assert_eq!(model.predict(0, hour).unwrap(), model.predict(0, hour).unwrap());
        }
    }

    #[test]
    fn test_rejects_hours_outside_day() {
        let (_, model) = train_scenario();
        assert!(matches!(model.predict(0, 24), Err(ModelError::InvalidInput(_))));
        assert!(matches!(model.predict(0, -1), Err(ModelError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_untrained_segment_code() {
        let (_, model) = train_scenario();
        assert!(matches!(model.predict(1, 8), Err(ModelError::OutOfDomain(_))));
    }

    #[test]
    fn test_rejects_samples_beyond_encoder() {
        let encoder = SegmentEncoder::fit([SegmentId::from("a")].iter());
        let samples = vec![EncodedSample::new(3, Hour::MIDNIGHT, 40.0)];
        let result = PredictionModel::train(&samples, &encoder, &ForestConfig::default());
        assert!(matches!(result, Err(ModelError::InvalidInput(_))));
    }
}
