use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("audio not ready: {0}")]
    NotReady(String),
    #[error("playback error: {0}")]
    Playback(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ConversionError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotReady(msg) => ConversionError::NotReady(msg),
            AppError::NotFound(msg) => ConversionError::NotReady(msg),
            AppError::BadRequest(msg) => ConversionError::Invalid(msg),
            _ => ConversionError::Dependency(err.to_string()),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::NotReady(msg) => AppError::NotReady(msg),
            ConversionError::Invalid(msg) => AppError::BadRequest(msg),
            ConversionError::Dependency(msg) => AppError::Backend(msg),
            ConversionError::Playback(msg) => AppError::Playback(msg),
            ConversionError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
