mod artifact_error;
mod evaluation;
mod model_error;
mod model_metadata;
mod prediction_model;
mod trained_model;

pub use artifact_error::ArtifactError;
pub use evaluation::{holdout_split, mean_absolute_error, EvaluationConfig};
pub use model_error::ModelError;
pub use model_metadata::{ModelMetadata, MODEL_FORMAT_VERSION};
pub use prediction_model::PredictionModel;
pub use trained_model::TrainedModel;
