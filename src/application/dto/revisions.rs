use crate::domain::revision::{RestoreOutcome, Revision, RevisionRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::{PostDto, PostSummaryDto};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionDto {
    pub id: i64,
    pub post_id: i64,
    pub version: i32,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Revision> for RevisionDto {
    fn from(revision: Revision) -> Self {
        let (content, excerpt) = revision.content.into_parts();
        Self {
            id: revision.id.into(),
            post_id: revision.post_id.into(),
            version: revision.version.into(),
            content,
            excerpt,
            created_at: revision.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionRefDto {
    pub revision_id: i64,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl From<RevisionRef> for RevisionRefDto {
    fn from(reference: RevisionRef) -> Self {
        Self {
            revision_id: reference.revision_id.into(),
            version: reference.version.into(),
            created_at: reference.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreOutcomeDto {
    pub post: PostDto,
    pub restored_from: RevisionRefDto,
    pub recorded: RevisionRefDto,
}

impl From<RestoreOutcome> for RestoreOutcomeDto {
    fn from(outcome: RestoreOutcome) -> Self {
        Self {
            restored_from: outcome.restored_from.into(),
            recorded: outcome.recorded.reference().into(),
            post: outcome.post.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionHistoryDto {
    pub post: PostSummaryDto,
    pub revisions: Vec<RevisionDto>,
    pub total_revisions: usize,
}
