use super::AppError;
use crate::model::{
    forest::ForestConfig, prediction::EvaluationConfig, simulation::SimulationConfig,
};
use serde::{Deserialize, Serialize};

/// settings for every stage of the pipeline. each section may be left out of a config
/// file, in which case its defaults apply. holdout evaluation only runs when an
/// `[evaluation]` section is present.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub simulation: SimulationConfig,
    pub forest: ForestConfig,
    pub evaluation: Option<EvaluationConfig>,
}

impl PipelineConfig {
    /// reads the config file when given, otherwise uses the defaults.
    pub fn from_optional_file(file: Option<&String>) -> Result<PipelineConfig, AppError> {
        match file {
            None => Ok(PipelineConfig::default()),
            Some(f) => {
                log::info!("reading segspeed configuration from {f}");
                PipelineConfig::try_from(f)
            }
        }
    }
}

impl TryFrom<&String> for PipelineConfig {
    type Error = AppError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let read = || {
            std::fs::read_to_string(f)
                .map_err(|e| AppError::ConfigurationError(format!("failure reading {f}: {e}")))
        };
        if f.ends_with(".toml") {
            let s = read()?;
            toml::from_str(&s).map_err(|e| {
                AppError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = read()?;
            serde_json::from_str(&s).map_err(|e| {
                AppError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(AppError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
