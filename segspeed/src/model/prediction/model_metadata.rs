use crate::model::forest::ForestConfig;
use serde::{Deserialize, Serialize};

/// version of the stored model layout. artifacts with another version are refused.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// facts about how a model was trained, stored with the model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelMetadata {
    pub format_version: u32,
    /// fingerprint of the encoder whose codes the model was trained on
    pub encoder_fingerprint: String,
    /// number of segment codes the model accepts
    pub segment_count: usize,
    pub sample_count: usize,
    pub hyperparameters: ForestConfig,
    /// RFC 3339 training time
    pub trained_at: String,
    /// mean absolute error on the holdout split, when one was evaluated
    pub mean_absolute_error: Option<f64>,
}
