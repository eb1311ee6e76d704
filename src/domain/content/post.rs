// src/domain/content/post.rs
use crate::domain::content::lifecycle::{PostStatus, Publication};
use crate::domain::content::value_objects::{EntityId, Title};
use crate::domain::errors::DomainResult;
use crate::domain::revision::RevisionContent;
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: EntityId,
    pub title: Title,
    pub slug: Slug,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Ascending, without duplicates.
    pub tag_ids: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// The fields tracked by revision history.
    pub fn revision_content(&self) -> RevisionContent {
        RevisionContent::new(self.content.clone(), self.excerpt.clone())
    }

    pub const fn publication(&self) -> Publication {
        Publication {
            status: self.status,
            published_at: self.published_at,
            scheduled_at: self.scheduled_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: Title,
    pub slug: Slug,
    pub content: String,
    pub excerpt: Option<String>,
    pub publication: Publication,
    pub tag_ids: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: EntityId,
    pub title: Option<Title>,
    pub slug: Option<Slug>,
    pub content: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub publication: Option<Publication>,
    /// Replaces the whole tag set.
    pub tag_ids: Option<Vec<EntityId>>,
    /// When set, the write only applies if the stored `updated_at` still equals it.
    pub expected_updated_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: EntityId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            content: None,
            excerpt: None,
            publication: None,
            tag_ids: None,
            expected_updated_at: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_body(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: Option<String>) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    /// Overwrite both revision-tracked fields at once.
    pub fn with_revision_content(self, content: RevisionContent) -> Self {
        let (body, excerpt) = content.into_parts();
        self.with_body(body).with_excerpt(excerpt)
    }

    pub fn with_publication(mut self, publication: Publication) -> Self {
        self.publication = Some(publication);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<EntityId>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }

    pub fn expecting(mut self, updated_at: DateTime<Utc>) -> Self {
        self.expected_updated_at = Some(updated_at);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.publication.is_none()
            && self.tag_ids.is_none()
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    /// Fails with `ConcurrentModification` when `expected_updated_at` no longer matches.
    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>>;
    /// Removes the post with its revisions and tag links.
    async fn delete(&self, id: EntityId) -> DomainResult<()>;
}

/// Sorted, de-duplicated tag ids.
pub fn normalize_tag_ids(ids: &[i64]) -> DomainResult<Vec<EntityId>> {
    let mut tag_ids = ids
        .iter()
        .map(|id| EntityId::new(*id))
        .collect::<DomainResult<Vec<_>>>()?;
    tag_ids.sort_unstable();
    tag_ids.dedup();
    Ok(tag_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn revision_content_copies_tracked_fields() {
        let now = Utc::now();
        let post = Post {
            id: EntityId::new(7).unwrap(),
            title: Title::new("Title").unwrap(),
            slug: Slug::new("title").unwrap(),
            content: "body".into(),
            excerpt: Some("short".into()),
            status: PostStatus::Draft,
            published_at: None,
            scheduled_at: None,
            tag_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            post.revision_content(),
            RevisionContent::new("body", Some("short".into()))
        );
    }

    #[test]
    fn revision_content_sets_body_and_excerpt() {
        let update = PostUpdate::new(EntityId::new(1).unwrap(), Utc::now())
            .with_revision_content(RevisionContent::new("old body", None));
        assert_eq!(update.content.as_deref(), Some("old body"));
        assert_eq!(update.excerpt, Some(None));
        assert!(update.title.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn tag_ids_are_sorted_and_deduplicated() {
        let ids = normalize_tag_ids(&[3, 1, 3, 2]).unwrap();
        assert_eq!(ids.iter().map(|id| id.0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(normalize_tag_ids(&[1, 0]).is_err());
    }

    #[test]
    fn tag_or_publication_change_is_not_empty() {
        let now = Utc::now();
        let id = EntityId::new(1).unwrap();
        assert!(!PostUpdate::new(id, now).with_tags(Vec::new()).is_empty());
        assert!(
            !PostUpdate::new(id, now)
                .with_publication(Publication::default())
                .is_empty()
        );
    }

    #[test]
    fn fresh_update_is_empty() {
        let update = PostUpdate::new(EntityId::new(1).unwrap(), Utc::now());
        assert!(update.is_empty());
        assert!(update.expected_updated_at.is_none());
    }
}
