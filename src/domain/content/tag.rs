use crate::domain::content::value_objects::{EntityId, Title};
use crate::domain::errors::DomainResult;
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Tag {
    pub id: EntityId,
    pub name: Title,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: Title,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TagUpdate {
    pub id: EntityId,
    pub name: Option<Title>,
    pub slug: Option<Slug>,
    pub updated_at: DateTime<Utc>,
}

impl TagUpdate {
    pub fn new(id: EntityId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: Title) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Fails with `Conflict` when the name is already used by another tag.
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag>;
    async fn update(&self, update: TagUpdate) -> DomainResult<Tag>;
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Tag>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>>;
    /// Also detaches the tag from every post.
    async fn delete(&self, id: EntityId) -> DomainResult<()>;
}
