use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failure reading artifact: {0}")]
    ReadError(String),
    #[error("failure writing artifact: {0}")]
    WriteError(String),
    #[error("model and encoder do not belong together: {0}")]
    ArtifactMismatch(String),
    #[error("artifact is corrupt: {0}")]
    CorruptArtifact(String),
}
