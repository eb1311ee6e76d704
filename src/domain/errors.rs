// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    /// The requested transition is not valid for the target entity.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// The entity changed since the caller last observed it.
    #[error("concurrent modification: {0}")]
    ConcurrentModification(String),
    /// Storage rejected a slug that another writer claimed first.
    #[error("slug already taken: {0}")]
    SlugTaken(String),
    /// Storage rejected a revision version that another writer claimed first.
    #[error("revision version already taken: {0}")]
    VersionTaken(String),
}

impl DomainError {
    /// Whether re-running allocation (slug or version) may resolve the error.
    pub const fn is_write_race(&self) -> bool {
        matches!(self, Self::SlugTaken(_) | Self::VersionTaken(_))
    }
}
