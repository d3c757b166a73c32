use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write config: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to serialize config: {0}")]
    SerializationError(#[from] ron::Error),
}
