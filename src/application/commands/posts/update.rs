use super::{PostCommandService, service::require_content};
use crate::{
    application::{
        commands::retry::{requested_slug, resolve_slug, retry_write_race},
        dto::PostDto,
        error::ApplicationResult,
    },
    domain::{
        content::{EntityId, Post, PostStatus, PostUpdate, Title, normalize_tag_ids},
        errors::DomainResult,
        revision::ensure_fresh,
        slug::{Slug, SlugNamespace, SlugService},
    },
};
use chrono::{DateTime, Utc};

pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the excerpt.
    pub excerpt: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Replaces the post's tags; `Some(vec![])` detaches all of them.
    pub tag_ids: Option<Vec<i64>>,
    /// `updated_at` as last shown to the editor; checked before writing.
    pub expected_updated_at: Option<DateTime<Utc>>,
}

impl UpdatePostCommand {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            content: None,
            excerpt: None,
            status: None,
            scheduled_at: None,
            tag_ids: None,
            expected_updated_at: None,
        }
    }
}

impl PostCommandService {
    /// Apply an edit. The write is conditional on the `updated_at` read here,
    /// and a revision is recorded only when content or excerpt changed; a
    /// status, schedule or tag change alone leaves history untouched.
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostDto> {
        let id = EntityId::new(command.id)?;
        let post = self.load_post(id).await?;

        if let Some(expected) = command.expected_updated_at {
            ensure_fresh(&post, expected)?;
        }

        let title = command.title.map(Title::new).transpose()?;
        let content = command.content.map(require_content).transpose()?;
        let excerpt = command.excerpt;
        let tag_ids = command
            .tag_ids
            .map(|ids| normalize_tag_ids(&ids))
            .transpose()?;
        let requested = requested_slug(command.slug);
        let (status, scheduled_at) = (command.status, command.scheduled_at);

        if title.is_none()
            && content.is_none()
            && excerpt.is_none()
            && requested.is_none()
            && tag_ids.is_none()
            && status.is_none()
            && scheduled_at.is_none()
        {
            return Ok(post.into());
        }

        let before = post.revision_content();
        let slugs = self.slug_service.as_ref();
        let posts = self.posts.as_ref();
        let clock = self.clock.as_ref();
        let (post_ref, title, content, excerpt, tag_ids, requested) =
            (&post, &title, &content, &excerpt, &tag_ids, &requested);

        let updated = retry_write_race(self.write_retry_limit, "update post", move || async move {
            let now = clock.now();
            let mut update = PostUpdate::new(id, now).expecting(post_ref.updated_at);

            let slug = next_slug(slugs, post_ref, title.as_ref(), requested.as_deref()).await?;
            if let Some(slug) = slug {
                update = update.with_slug(slug);
            }
            if let Some(title) = title {
                update = update.with_title(title.clone());
            }
            if let Some(content) = content {
                update = update.with_body(content.clone());
            }
            if let Some(excerpt) = excerpt {
                update = update.with_excerpt(excerpt.clone());
            }
            if status.is_some() || scheduled_at.is_some() {
                update = update.with_publication(
                    post_ref.publication().revise(status, scheduled_at, now),
                );
            }
            if let Some(tag_ids) = tag_ids {
                update = update.with_tags(tag_ids.clone());
            }

            posts.update(update).await
        })
        .await?;

        self.guard
            .create_revision_if_changed(id, &before, &updated.revision_content())
            .await?;

        tracing::info!(post_id = %updated.id, slug = %updated.slug, "updated post");
        Ok(updated.into())
    }
}

/// An explicit slug different from the current one is normalized and made
/// unique; a new title without an explicit slug re-derives it. Otherwise the
/// slug stays as is.
async fn next_slug(
    slugs: &SlugService,
    post: &Post,
    title: Option<&Title>,
    requested: Option<&str>,
) -> DomainResult<Option<Slug>> {
    match (requested, title) {
        (Some(requested), _) if requested == post.slug.as_str() => Ok(None),
        (Some(_), _) | (None, Some(_)) => {
            let text = title.map_or_else(|| post.title.as_str(), Title::as_str);
            resolve_slug(slugs, SlugNamespace::Posts, text, requested, Some(post.id))
                .await
                .map(Some)
        }
        (None, None) => Ok(None),
    }
}
