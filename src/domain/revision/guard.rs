// src/domain/revision/guard.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::time::Clock;
use crate::domain::content::{EntityId, Post, PostRepository, PostUpdate};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::revision::entity::{NewRevision, Revision, RevisionRef};
use crate::domain::revision::repository::RevisionRepository;
use crate::domain::revision::value_objects::{RevisionContent, RevisionVersion};

/// Result of a successful restore.
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    pub post: Post,
    pub restored_from: RevisionRef,
    /// Revision appended for the post-restore state.
    pub recorded: Revision,
}

/// Domain service that writes post content only when history allows it.
///
/// Restores go through ownership and freshness checks before anything is
/// written, and every content change is appended to the history at the next
/// unclaimed version. Versions of deleted revisions stay claimed. Version
/// numbers are claimed optimistically: a `VersionTaken` rejection from storage
/// re-reads the highest claimed version and tries again, up to
/// `write_retry_limit` attempts.
pub struct RevisionGuard {
    posts: Arc<dyn PostRepository>,
    revisions: Arc<dyn RevisionRepository>,
    clock: Arc<dyn Clock>,
    write_retry_limit: u32,
}

impl RevisionGuard {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        revisions: Arc<dyn RevisionRepository>,
        clock: Arc<dyn Clock>,
        write_retry_limit: u32,
    ) -> Self {
        Self {
            posts,
            revisions,
            clock,
            write_retry_limit: write_retry_limit.max(1),
        }
    }

    /// Overwrite the post's content with `target` and record the result as a
    /// new revision.
    ///
    /// `expected_updated_at` is the `updated_at` the caller last saw. When it
    /// is given, the restore is rejected if the post changed since, both at
    /// check time and at write time. Without it, freshness is not checked.
    pub async fn restore(
        &self,
        post: &Post,
        target: &Revision,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> DomainResult<RestoreOutcome> {
        ensure_owned_by(post, target)?;

        let mut update = PostUpdate::new(post.id, self.clock.now())
            .with_revision_content(target.content.clone());

        if let Some(expected) = expected_updated_at {
            if let Err(err) = ensure_fresh(post, expected) {
                tracing::warn!(
                    post_id = %post.id,
                    %expected,
                    actual = %post.updated_at,
                    "restore rejected: post changed since it was read"
                );
                return Err(err);
            }
            update = update.expecting(post.updated_at);
        }

        let updated = self.posts.update(update).await?;
        let recorded = self.record(updated.id, updated.revision_content()).await?;

        tracing::info!(
            post_id = %updated.id,
            restored_version = %target.version,
            recorded_version = %recorded.version,
            "restored post revision"
        );

        Ok(RestoreOutcome {
            post: updated,
            restored_from: target.reference(),
            recorded,
        })
    }

    /// Append a revision of `new` unless it equals `old`.
    pub async fn create_revision_if_changed(
        &self,
        post_id: EntityId,
        old: &RevisionContent,
        new: &RevisionContent,
    ) -> DomainResult<Option<Revision>> {
        if old == new {
            return Ok(None);
        }
        self.record(post_id, new.clone()).await.map(Some)
    }

    async fn record(&self, post_id: EntityId, content: RevisionContent) -> DomainResult<Revision> {
        let mut attempt = 1;
        loop {
            let version = match self.revisions.highest_claimed_version(post_id).await? {
                Some(latest) => latest.next()?,
                None => RevisionVersion::first(),
            };

            let revision = NewRevision {
                post_id,
                version,
                content: content.clone(),
                created_at: self.clock.now(),
            };

            match self.revisions.insert(revision).await {
                Err(DomainError::VersionTaken(reason)) if attempt < self.write_retry_limit => {
                    tracing::warn!(
                        %post_id,
                        %version,
                        attempt,
                        %reason,
                        "revision version claimed concurrently, retrying"
                    );
                    attempt += 1;
                }
                Ok(revision) => {
                    tracing::debug!(%post_id, version = %revision.version, "recorded revision");
                    return Ok(revision);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Reject a revision that belongs to another post.
pub fn ensure_owned_by(post: &Post, revision: &Revision) -> DomainResult<()> {
    if revision.post_id == post.id {
        Ok(())
    } else {
        Err(DomainError::InvalidOperation(format!(
            "revision {} does not belong to post {}",
            revision.id, post.id
        )))
    }
}

/// Compare the caller's view of `updated_at` with the current one, to the
/// millisecond.
pub fn ensure_fresh(post: &Post, expected_updated_at: DateTime<Utc>) -> DomainResult<()> {
    if post.updated_at.timestamp_millis() == expected_updated_at.timestamp_millis() {
        Ok(())
    } else {
        Err(DomainError::ConcurrentModification(
            "post has been modified since you last viewed it, please refresh and try again"
                .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{PostStatus, Title};
    use crate::domain::revision::value_objects::RevisionId;
    use crate::domain::slug::Slug;
    use chrono::{Duration, TimeZone};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn post(id: i64, updated_at: DateTime<Utc>) -> Post {
        Post {
            id: EntityId::new(id).unwrap(),
            title: Title::new("t").unwrap(),
            slug: Slug::new("t").unwrap(),
            content: "current".into(),
            excerpt: None,
            status: PostStatus::Draft,
            published_at: None,
            scheduled_at: None,
            tag_ids: Vec::new(),
            created_at: updated_at,
            updated_at,
        }
    }

    fn revision(post_id: i64) -> Revision {
        Revision {
            id: RevisionId::new(9).unwrap(),
            post_id: EntityId::new(post_id).unwrap(),
            version: RevisionVersion::first(),
            content: RevisionContent::new("old", None),
            created_at: at(0),
        }
    }

    #[test]
    fn ownership_accepts_own_revision() {
        assert!(ensure_owned_by(&post(1, at(0)), &revision(1)).is_ok());
    }

    #[test]
    fn ownership_rejects_foreign_revision() {
        let err = ensure_owned_by(&post(1, at(0)), &revision(2)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
    }

    #[test]
    fn freshness_accepts_exact_match() {
        let ts = at(1_700_000_000_123);
        assert!(ensure_fresh(&post(1, ts), ts).is_ok());
    }

    #[test]
    fn freshness_ignores_sub_millisecond_digits() {
        let stored = at(1_700_000_000_123) + Duration::microseconds(456);
        let seen = at(1_700_000_000_123);
        assert!(ensure_fresh(&post(1, stored), seen).is_ok());
    }

    #[test]
    fn freshness_rejects_stale_token() {
        let stored = at(1_700_000_000_124);
        let seen = at(1_700_000_000_123);
        let err = ensure_fresh(&post(1, stored), seen).unwrap_err();
        assert!(matches!(err, DomainError::ConcurrentModification(_)));
    }
}
