use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevisionId(pub i64);

impl RevisionId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("revision id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<RevisionId> for i64 {
    fn from(value: RevisionId) -> Self {
        value.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-post revision number: 1, 2, 3, ... never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionVersion(i32);

impl RevisionVersion {
    pub fn new(version: i32) -> DomainResult<Self> {
        if version < 1 {
            Err(DomainError::Validation(
                "revision version must be at least 1".into(),
            ))
        } else {
            Ok(Self(version))
        }
    }

    pub const fn first() -> Self {
        Self(1)
    }

    pub fn next(self) -> DomainResult<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| DomainError::Conflict("revision version overflow".into()))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<RevisionVersion> for i32 {
    fn from(value: RevisionVersion) -> Self {
        value.0
    }
}

impl fmt::Display for RevisionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content fields guarded by revision history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionContent {
    pub content: String,
    pub excerpt: Option<String>,
}

impl RevisionContent {
    pub fn new(content: impl Into<String>, excerpt: Option<String>) -> Self {
        Self {
            content: content.into(),
            excerpt,
        }
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.content, self.excerpt)
    }
}
