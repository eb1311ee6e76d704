// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Errors the caller can fix by correcting or refreshing the request.
    ///
    /// A slug or version race that outlived the retry budget is contention on
    /// the server side, so it counts with storage failures.
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::Domain(err) => {
                !matches!(err, DomainError::Persistence(_)) && !err.is_write_race()
            }
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_) => true,
            Self::Infrastructure(_) => false,
        }
    }
}
