// src/application/queries/content.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{PostDto, ProjectDto, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{EntityId, PostRepository, ProjectRepository, TagRepository},
        slug::Slug,
    },
};

pub struct ContentQueryService {
    posts: Arc<dyn PostRepository>,
    projects: Arc<dyn ProjectRepository>,
    tags: Arc<dyn TagRepository>,
}

impl ContentQueryService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        projects: Arc<dyn ProjectRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            posts,
            projects,
            tags,
        }
    }

    pub async fn get_post(&self, id: i64) -> ApplicationResult<PostDto> {
        let id = EntityId::new(id)?;
        self.posts
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> ApplicationResult<PostDto> {
        let slug = parse_lookup_slug(slug, "post")?;
        self.posts
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("post with slug {slug} not found")))
    }

    pub async fn get_project_by_slug(&self, slug: &str) -> ApplicationResult<ProjectDto> {
        let slug = parse_lookup_slug(slug, "project")?;
        self.projects
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| {
                ApplicationError::not_found(format!("project with slug {slug} not found"))
            })
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> ApplicationResult<TagDto> {
        let slug = parse_lookup_slug(slug, "tag")?;
        self.tags
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("tag with slug {slug} not found")))
    }
}

// A malformed slug cannot name anything that exists.
fn parse_lookup_slug(slug: &str, kind: &str) -> ApplicationResult<Slug> {
    Slug::new(slug)
        .map_err(|_| ApplicationError::not_found(format!("{kind} with slug {slug} not found")))
}
