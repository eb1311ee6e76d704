// src/domain/content/lifecycle.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl PostStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Scheduled => "SCHEDULED",
            Self::Published => "PUBLISHED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "SCHEDULED" => Ok(Self::Scheduled),
            "PUBLISHED" => Ok(Self::Published),
            "ARCHIVED" => Ok(Self::Archived),
            other => Err(DomainError::Validation(format!("unknown post status: {other}"))),
        }
    }
}

/// Publication state of a post.
///
/// `published_at` is set exactly while the post is `Published`; re-publishing
/// through an edit keeps the first publication time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Publication {
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Publication {
    /// State of a new post. An explicit status wins, otherwise a schedule in
    /// the future makes it `Scheduled` and anything else starts as a draft.
    pub fn initial(
        requested: Option<PostStatus>,
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let status = requested.unwrap_or(if scheduled_at.is_some_and(|at| at > now) {
            PostStatus::Scheduled
        } else {
            PostStatus::Draft
        });

        Self {
            status,
            published_at: (status == PostStatus::Published).then_some(now),
            scheduled_at,
        }
    }

    /// Apply an edit's status and schedule. A future schedule moves the post
    /// to `Scheduled` unless the same edit publishes it.
    pub fn revise(
        self,
        requested: Option<PostStatus>,
        scheduled_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let reschedules = scheduled_at.is_some_and(|at| at > now)
            && requested != Some(PostStatus::Published);
        let status = if reschedules {
            PostStatus::Scheduled
        } else {
            requested.unwrap_or(self.status)
        };

        Self {
            status,
            published_at: self.published_at_for(status, now),
            scheduled_at: scheduled_at.or(self.scheduled_at),
        }
    }

    pub fn publish(self, now: DateTime<Utc>) -> DomainResult<Self> {
        if self.status == PostStatus::Published {
            return Err(DomainError::InvalidOperation(
                "post is already published".into(),
            ));
        }
        Ok(Self {
            status: PostStatus::Published,
            published_at: Some(now),
            scheduled_at: None,
        })
    }

    pub fn unpublish(self) -> DomainResult<Self> {
        if self.status != PostStatus::Published {
            return Err(DomainError::InvalidOperation("post is not published".into()));
        }
        Ok(Self {
            status: PostStatus::Draft,
            published_at: None,
            ..self
        })
    }

    pub fn archive(self) -> DomainResult<Self> {
        if self.status == PostStatus::Archived {
            return Err(DomainError::InvalidOperation(
                "post is already archived".into(),
            ));
        }
        Ok(Self {
            status: PostStatus::Archived,
            published_at: None,
            ..self
        })
    }

    fn published_at_for(self, status: PostStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match status {
            PostStatus::Published => self.published_at.or(Some(now)),
            _ => None,
        }
    }
}
