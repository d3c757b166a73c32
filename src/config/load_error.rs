use std::str::Utf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    #[error("config is not valid utf8: {0}")]
    Utf8Error(#[from] Utf8Error),
    #[error("failed to parse config: {0}")]
    DeserializationError(#[from] ron::error::SpannedError),
}
