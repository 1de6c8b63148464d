use super::{
    holdout_split, mean_absolute_error, ArtifactError, EvaluationConfig, ModelError,
    PredictionModel, MODEL_FORMAT_VERSION,
};
use crate::model::{
    encoding::{EncodedSample, SegmentEncoder, FEATURE_COUNT},
    forest::ForestConfig,
};
use segspeed_core::{segment::SegmentId, util::fs_utils};
use std::path::Path;

/// an artifact pair: a prediction model and the encoder it was trained against. the pair
/// is checked on construction so a model can never be used with a foreign encoder.
#[derive(Clone, Debug)]
pub struct TrainedModel {
    model: PredictionModel,
    encoder: SegmentEncoder,
}

impl TrainedModel {
    /// pairs a model with an encoder.
    ///
    /// # Returns
    ///
    /// * the pair, or [`ArtifactError::ArtifactMismatch`] if the model was not trained
    ///   against this encoder
    pub fn new(model: PredictionModel, encoder: SegmentEncoder) -> Result<Self, ArtifactError> {
        let metadata = model.metadata();
        if metadata.format_version != MODEL_FORMAT_VERSION {
            return Err(ArtifactError::ArtifactMismatch(format!(
                "model format version {} is not supported, expected {}",
                metadata.format_version, MODEL_FORMAT_VERSION
            )));
        }
        if metadata.encoder_fingerprint != encoder.fingerprint() {
            return Err(ArtifactError::ArtifactMismatch(format!(
                "model was trained against encoder {} but encoder {} was provided",
                metadata.encoder_fingerprint,
                encoder.fingerprint()
            )));
        }
        if metadata.segment_count != encoder.len() {
            return Err(ArtifactError::ArtifactMismatch(format!(
                "model expects {} segment codes but the encoder has {}",
                metadata.segment_count,
                encoder.len()
            )));
        }
        model
            .forest()
            .validate(FEATURE_COUNT)
            .map_err(ArtifactError::CorruptArtifact)?;
        Ok(TrainedModel { model, encoder })
    }

    /// trains a model on the samples. with an evaluation config, the model is fitted on
    /// the training split only and its holdout error is recorded in the metadata.
    pub fn train(
        samples: &[EncodedSample],
        encoder: SegmentEncoder,
        forest_config: &ForestConfig,
        evaluation: Option<&EvaluationConfig>,
    ) -> Result<TrainedModel, ModelError> {
        let model = match evaluation {
            None => PredictionModel::train(samples, &encoder, forest_config)?,
            Some(eval_config) => {
                let (train, test) = holdout_split(samples, eval_config)?;
                let mut model = PredictionModel::train(&train, &encoder, forest_config)?;
                let mae = mean_absolute_error(&model, &test)?;
                log::info!(
                    "holdout mean absolute error: {:.3} km/h over {} samples",
                    mae,
                    test.len()
                );
                model.set_mean_absolute_error(mae);
                model
            }
        };
        Ok(TrainedModel { model, encoder })
    }

    /// predicted speed for a segment id at an hour of the day.
    pub fn predict(&self, segment_id: &SegmentId, hour: i64) -> Result<f64, ModelError> {
        let code = self.encoder.encode(segment_id)?;
        self.model.predict(code, hour)
    }

    pub fn model(&self) -> &PredictionModel {
        &self.model
    }

    pub fn encoder(&self) -> &SegmentEncoder {
        &self.encoder
    }

    /// writes the model and the encoder to their own files, gzipped when the path ends
    /// with `.gz`.
    pub fn save_pair(&self, model_path: &Path, encoder_path: &Path) -> Result<(), ArtifactError> {
        fs_utils::write_json(&self.model, model_path).map_err(ArtifactError::WriteError)?;
        fs_utils::write_json(&self.encoder, encoder_path).map_err(ArtifactError::WriteError)?;
        log::info!(
            "wrote model to {} and encoder to {}",
            model_path.to_string_lossy(),
            encoder_path.to_string_lossy()
        );
        Ok(())
    }

    /// reads a model and an encoder and pairs them, failing before any prediction if
    /// they were not trained together.
    pub fn load_pair(model_path: &Path, encoder_path: &Path) -> Result<Self, ArtifactError> {
        let model: PredictionModel =
            fs_utils::read_json(model_path).map_err(ArtifactError::ReadError)?;
        let encoder: SegmentEncoder =
            fs_utils::read_json(encoder_path).map_err(ArtifactError::ReadError)?;
        let pair = TrainedModel::new(model, encoder)?;
        log::info!(
            "loaded model trained at {} with {} segment codes",
            pair.model.metadata().trained_at,
            pair.encoder.len()
        );
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::encoding::encode_observations;
    use segspeed_core::observation::{Hour, TrafficObservation};
    use std::path::PathBuf;

    fn observations(ids: &[&str]) -> Vec<TrafficObservation> {
        ids.iter()
            .flat_map(|id| {
                Hour::all().map(move |hour| {
                    let speed = if (7..=9).contains(&hour.value()) { 18.0 } else { 48.0 };
                    TrafficObservation::new(SegmentId::from(*id), hour, speed)
                })
            })
            .collect()
    }

    fn trained(ids: &[&str], evaluation: Option<&EvaluationConfig>) -> TrainedModel {
        let obs = observations(ids);
        let encoder = SegmentEncoder::fit(obs.iter().map(|o| &o.segment_id));
        let samples = encode_observations(&encoder, &obs).unwrap();
        let config = ForestConfig {
            tree_count: 10,
            ..Default::default()
        };
        TrainedModel::train(&samples, encoder, &config, evaluation).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("segspeed-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_predict_by_segment_id() {
        let pair = trained(&["a", "b"], None);
        let rush = pair.predict(&SegmentId::from("b"), 8).unwrap();
        let night = pair.predict(&SegmentId::from("b"), 2).unwrap();
        assert!(rush < night);
        assert!(matches!(
            pair.predict(&SegmentId::from("c"), 8),
            Err(ModelError::Encoder(_))
        ));
    }

    #[test]
    fn test_mismatched_encoder_is_rejected() {
        let pair = trained(&["a", "b"], None);
        let other = SegmentEncoder::fit([SegmentId::from("b"), SegmentId::from("a")].iter());
        let result = TrainedModel::new(pair.model().clone(), other);
        assert!(matches!(result, Err(ArtifactError::ArtifactMismatch(_))));
    }

    #[test]
    fn test_save_and_load_pair() {
        let pair = trained(&["a", "b"], None);
        let model_path = temp_path("pair-model.json.gz");
        let encoder_path = temp_path("pair-encoder.json");
        pair.save_pair(&model_path, &encoder_path).unwrap();
        let loaded = TrainedModel::load_pair(&model_path, &encoder_path).unwrap();
        for hour in 0..24 {
            assert_eq!(
                loaded.predict(&SegmentId::from("a"), hour).unwrap(),
                pair.predict(&SegmentId::from("a"), hour).unwrap()
            );
        }
        std::fs::remove_file(model_path).unwrap();
        std::fs::remove_file(encoder_path).unwrap();
    }

    #[test]
    fn test_load_pair_from_different_runs_fails() {
        let first = trained(&["a", "b"], None);
        let second = trained(&["a", "b", "c"], None);
        let model_path = temp_path("mixed-model.json");
        let encoder_path = temp_path("mixed-encoder.json");
        let unused = temp_path("mixed-unused.json");
        first.save_pair(&model_path, &unused).unwrap();
        second.save_pair(&unused, &encoder_path).unwrap();
        let result = TrainedModel::load_pair(&model_path, &encoder_path);
        assert!(matches!(result, Err(ArtifactError::ArtifactMismatch(_))));
        for path in [model_path, encoder_path, unused] {
            std::fs::remove_file(path).unwrap();
        }
    }

    #[test]
    fn test_holdout_error_recorded() {
        let pair = trained(&["a", "b"], Some(&EvaluationConfig::default()));
        let mae = pair.model().metadata().mean_absolute_error.unwrap();
        assert!(mae.is_finite() && mae >= 0.0);
        assert_eq!(pair.model().metadata().sample_count, 38);
    }
}
