use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateAccount,

    #[error("Email is not registered")]
    AccountNotFound,

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Camera unavailable: {0}")]
    Media(#[from] MediaAccessError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Camera acquisition failures. Never fatal: the scanner degrades to a
/// simulated mode when acquisition fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MediaAccessError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera support in this environment")]
    Unsupported,
}

pub type AppResult<T> = Result<T, AppError>;
