use crate::domain::content::EntityId;
use crate::domain::revision::value_objects::{RevisionContent, RevisionId, RevisionVersion};
use chrono::{DateTime, Utc};

/// Immutable snapshot of a post's content.
#[derive(Debug, Clone)]
pub struct Revision {
    pub id: RevisionId,
    pub post_id: EntityId,
    pub version: RevisionVersion,
    pub content: RevisionContent,
    pub created_at: DateTime<Utc>,
}

impl Revision {
    pub fn reference(&self) -> RevisionRef {
        RevisionRef {
            revision_id: self.id,
            version: self.version,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRevision {
    pub post_id: EntityId,
    pub version: RevisionVersion,
    pub content: RevisionContent,
    pub created_at: DateTime<Utc>,
}

/// Points at the revision a restore was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionRef {
    pub revision_id: RevisionId,
    pub version: RevisionVersion,
    pub created_at: DateTime<Utc>,
}
