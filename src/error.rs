/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Audio not ready: {0}")]
    NotReady(String),

    #[error("Backend rejected request: {0}")]
    Backend(String),

    #[error("Audio playback failed: {0}")]
    Playback(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit code reported when this error aborts a command.
    ///
    /// Usage errors exit with 2, a missing or not-yet-converted audio file
    /// exits with 3 so scripts can poll `status` cheaply, everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_) => 2,
            Self::NotFound(_) | Self::NotReady(_) => 3,
            Self::Transport(_)
            | Self::Io(_)
            | Self::Backend(_)
            | Self::Playback(_)
            | Self::Internal(_) => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
