use crate::model::prediction::ArtifactError;
use segspeed_core::segment::CatalogError;
use thiserror::Error;

/// failure to start a prediction service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
