// src/application/commands/posts/create.rs
use super::{PostCommandService, service::require_content};
use crate::{
    application::{
        commands::retry::{requested_slug, resolve_slug, retry_write_race},
        dto::PostDto,
        error::ApplicationResult,
    },
    domain::{
        content::{NewPost, PostStatus, Publication, Title, normalize_tag_ids},
        slug::SlugNamespace,
    },
};
use chrono::{DateTime, Utc};

pub struct CreatePostCommand {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: Option<String>,
    /// Defaults to `Scheduled` for a future `scheduled_at`, else `Draft`.
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub tag_ids: Vec<i64>,
}

impl CreatePostCommand {
    pub fn builder() -> CreatePostCommandBuilder {
        CreatePostCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreatePostCommandBuilder {
    title: Option<String>,
    slug: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    status: Option<PostStatus>,
    scheduled_at: Option<DateTime<Utc>>,
    tag_ids: Vec<i64>,
}

impl CreatePostCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub const fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub const fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn tag_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids = ids.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<CreatePostCommand, &'static str> {
        Ok(CreatePostCommand {
            title: self.title.ok_or("title is required")?,
            slug: self.slug,
            content: self.content.ok_or("content is required")?,
            excerpt: self.excerpt,
            status: self.status,
            scheduled_at: self.scheduled_at,
            tag_ids: self.tag_ids,
        })
    }
}

impl PostCommandService {
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostDto> {
        let title = Title::new(command.title)?;
        let content = require_content(command.content)?;
        let excerpt = command.excerpt;
        let tag_ids = normalize_tag_ids(&command.tag_ids)?;
        let requested = requested_slug(command.slug);
        let now = self.clock.now();
        let publication = Publication::initial(command.status, command.scheduled_at, now);

        let slugs = self.slug_service.as_ref();
        let posts = self.posts.as_ref();
        let (title, content, excerpt, tag_ids, requested) =
            (&title, &content, &excerpt, &tag_ids, &requested);

        let created = retry_write_race(self.write_retry_limit, "create post", move || async move {
            let slug = resolve_slug(
                slugs,
                SlugNamespace::Posts,
                title.as_str(),
                requested.as_deref(),
                None,
            )
            .await?;

            posts
                .insert(NewPost {
                    title: title.clone(),
                    slug,
                    content: content.clone(),
                    excerpt: excerpt.clone(),
                    publication,
                    tag_ids: tag_ids.clone(),
                    created_at: now,
                    updated_at: now,
                })
                .await
        })
        .await?;

        tracing::info!(
            post_id = %created.id,
            slug = %created.slug,
            status = %created.status,
            "created post"
        );
        Ok(created.into())
    }
}
