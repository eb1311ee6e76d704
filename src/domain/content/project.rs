use crate::domain::content::value_objects::{EntityId, Title};
use crate::domain::errors::DomainResult;
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Project {
    pub id: EntityId,
    pub title: Title,
    pub slug: Slug,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: Title,
    pub slug: Slug,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectUpdate {
    pub id: EntityId,
    pub title: Option<Title>,
    pub slug: Option<Slug>,
    pub description: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectUpdate {
    pub fn new(id: EntityId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            description: None,
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

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, project: NewProject) -> DomainResult<Project>;
    async fn update(&self, update: ProjectUpdate) -> DomainResult<Project>;
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Project>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Project>>;
    async fn delete(&self, id: EntityId) -> DomainResult<()>;
}
