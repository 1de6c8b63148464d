use super::{AppError, PipelineConfig};
use crate::model::{
    encoding::{encode_observations, SegmentEncoder},
    prediction::TrainedModel,
};
use segspeed_core::observation::{check_coverage, read_observations};
use std::path::Path;

/// fits an encoder and a model on an observation table and writes the artifact pair. the
/// table must hold exactly one observation per segment and hour of the day.
pub fn run(
    observations_file: &Path,
    model_file: &Path,
    encoder_file: &Path,
    config: &PipelineConfig,
) -> Result<TrainedModel, AppError> {
    let observations = read_observations(observations_file)?;
    check_coverage(&observations)?;
    let encoder = SegmentEncoder::fit(observations.iter().map(|o| &o.segment_id));
    let samples = encode_observations(&encoder, &observations)?;
    let model = TrainedModel::train(
        &samples,
        encoder,
        &config.forest,
        config.evaluation.as_ref(),
    )?;
    model.save_pair(model_file, encoder_file)?;
    Ok(model)
}
