use crate::model::{
    encoding::EncoderError,
    prediction::{ArtifactError, ModelError},
    service::ServiceError,
    simulation::SimulationError,
};
use segspeed_core::{observation::ObservationError, segment::CatalogError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Observation(#[from] ObservationError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Encoder(#[from] EncoderError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("invalid query on line {line}: {message}")]
    InvalidQuery { line: usize, message: String },
    #[error("{0}")]
    IoError(String),
}
