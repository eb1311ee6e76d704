// src/application/queries/revisions.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{RevisionDto, RevisionHistoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{EntityId, Post, PostRepository},
        revision::{RevisionId, RevisionRepository, RevisionVersion},
    },
};

pub struct RevisionQueryService {
    posts: Arc<dyn PostRepository>,
    revisions: Arc<dyn RevisionRepository>,
}

impl RevisionQueryService {
    pub fn new(posts: Arc<dyn PostRepository>, revisions: Arc<dyn RevisionRepository>) -> Self {
        Self { posts, revisions }
    }

    /// Revisions of a post, newest first.
    pub async fn list_revisions(&self, post_id: i64) -> ApplicationResult<Vec<RevisionDto>> {
        let post = self.load_post(post_id).await?;
        let revisions = self.revisions.list_by_post(post.id).await?;
        Ok(revisions.into_iter().map(Into::into).collect())
    }

    pub async fn get_revision(&self, revision_id: i64) -> ApplicationResult<RevisionDto> {
        let id = RevisionId::new(revision_id)?;
        self.revisions
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("revision {id} not found")))
    }

    pub async fn get_revision_by_version(
        &self,
        post_id: i64,
        version: i32,
    ) -> ApplicationResult<RevisionDto> {
        let post_id = EntityId::new(post_id)?;
        let version = RevisionVersion::new(version)?;
        self.revisions
            .find_by_version(post_id, version)
            .await?
            .map(Into::into)
            .ok_or_else(|| {
                ApplicationError::not_found(format!(
                    "revision version {version} not found for post {post_id}"
                ))
            })
    }

    pub async fn latest_revision(&self, post_id: i64) -> ApplicationResult<RevisionDto> {
        let post_id = EntityId::new(post_id)?;
        self.revisions
            .latest(post_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| {
                ApplicationError::not_found(format!("no revisions found for post {post_id}"))
            })
    }

    pub async fn revision_count(&self, post_id: i64) -> ApplicationResult<u64> {
        let post_id = EntityId::new(post_id)?;
        Ok(self.revisions.count_by_post(post_id).await?)
    }

    /// Current post state together with its full history.
    pub async fn revision_history(&self, post_id: i64) -> ApplicationResult<RevisionHistoryDto> {
        let post = self.load_post(post_id).await?;
        let revisions: Vec<RevisionDto> = self
            .revisions
            .list_by_post(post.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(RevisionHistoryDto {
            total_revisions: revisions.len(),
            revisions,
            post: post.into(),
        })
    }

    async fn load_post(&self, post_id: i64) -> ApplicationResult<Post> {
        let id = EntityId::new(post_id)?;
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))
    }
}
