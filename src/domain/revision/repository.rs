use crate::domain::content::EntityId;
use crate::domain::errors::DomainResult;
use crate::domain::revision::entity::{NewRevision, Revision};
use crate::domain::revision::value_objects::{RevisionId, RevisionVersion};
use async_trait::async_trait;

#[async_trait]
pub trait RevisionRepository: Send + Sync {
    /// Highest version ever claimed for the post, deleted revisions included.
    async fn highest_claimed_version(
        &self,
        post_id: EntityId,
    ) -> DomainResult<Option<RevisionVersion>>;
    /// Claims `version` and stores the revision. Fails with `VersionTaken` when
    /// `version` is not above every version claimed so far for the post and
    /// with `NotFound` when the post does not exist.
    async fn insert(&self, revision: NewRevision) -> DomainResult<Revision>;
    async fn find_by_id(&self, id: RevisionId) -> DomainResult<Option<Revision>>;
    async fn find_by_version(
        &self,
        post_id: EntityId,
        version: RevisionVersion,
    ) -> DomainResult<Option<Revision>>;
    async fn latest(&self, post_id: EntityId) -> DomainResult<Option<Revision>>;
    /// Newest first.
    async fn list_by_post(&self, post_id: EntityId) -> DomainResult<Vec<Revision>>;
    async fn count_by_post(&self, post_id: EntityId) -> DomainResult<u64>;
    async fn delete(&self, id: RevisionId) -> DomainResult<()>;
}
