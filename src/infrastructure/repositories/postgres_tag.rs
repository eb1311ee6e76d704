use super::map_sqlx;
use crate::domain::content::{EntityId, NewTag, Tag, TagRepository, TagUpdate, Title};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TagRow {
    id: i64,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EntityId::new(row.id)?,
            name: Title::new(row.name)?,
            slug: Slug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name, slug, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, slug, created_at, updated_at",
        )
        .bind(tag.name.as_str())
        .bind(tag.slug.as_str())
        .bind(tag.created_at)
        .bind(tag.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Tag::try_from(row)
    }

    async fn update(&self, update: TagUpdate) -> DomainResult<Tag> {
        let TagUpdate {
            id,
            name,
            slug,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, TagRow>(
            "UPDATE tags
             SET name = COALESCE($1, name), slug = COALESCE($2, slug), updated_at = $3
             WHERE id = $4
             RETURNING id, name, slug, created_at, updated_at",
        )
        .bind(name.map(String::from))
        .bind(slug.map(String::from))
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("tag {id} not found")))?;

        Tag::try_from(row)
    }

    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, slug, created_at, updated_at FROM tags WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Tag::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, slug, created_at, updated_at FROM tags WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Tag::try_from).transpose()
    }

    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("tag {id} not found")));
        }
        Ok(())
    }
}
