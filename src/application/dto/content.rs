use crate::domain::content::{Post, Project, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub status: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title.into_inner(),
            slug: post.slug.into_inner(),
            content: post.content,
            excerpt: post.excerpt,
            status: post.status.as_str().to_owned(),
            published_at: post.published_at,
            scheduled_at: post.scheduled_at,
            tag_ids: post.tag_ids.into_iter().map(i64::from).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Post header shown alongside its history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub current_content: String,
    #[serde(default)]
    pub current_excerpt: Option<String>,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostSummaryDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title.into_inner(),
            slug: post.slug.into_inner(),
            current_content: post.content,
            current_excerpt: post.excerpt,
            status: post.status.as_str().to_owned(),
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.into(),
            title: project.title.into_inner(),
            slug: project.slug.into_inner(),
            description: project.description,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.into(),
            name: tag.name.into_inner(),
            slug: tag.slug.into_inner(),
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}
