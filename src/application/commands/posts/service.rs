// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        content::{EntityId, Post, PostRepository},
        revision::{RevisionGuard, RevisionRepository},
        slug::SlugService,
    },
};

pub struct PostCommandService {
    pub(super) posts: Arc<dyn PostRepository>,
    pub(super) revisions: Arc<dyn RevisionRepository>,
    pub(super) slug_service: Arc<SlugService>,
    pub(super) guard: Arc<RevisionGuard>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) write_retry_limit: u32,
}

impl PostCommandService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        revisions: Arc<dyn RevisionRepository>,
        slug_service: Arc<SlugService>,
        guard: Arc<RevisionGuard>,
        clock: Arc<dyn Clock>,
        write_retry_limit: u32,
    ) -> Self {
        Self {
            posts,
            revisions,
            slug_service,
            guard,
            clock,
            write_retry_limit,
        }
    }

    pub(super) async fn load_post(&self, id: EntityId) -> ApplicationResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))
    }
}

pub(super) fn require_content(content: String) -> ApplicationResult<String> {
    if content.trim().is_empty() {
        Err(ApplicationError::validation("content cannot be empty"))
    } else {
        Ok(content)
    }
}
