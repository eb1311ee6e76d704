// src/infrastructure/repositories/postgres_post.rs
use super::map_sqlx;
use crate::domain::content::{
    EntityId, NewPost, Post, PostRepository, PostStatus, PostUpdate, Title,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

const POST_COLUMNS: &str = "p.id, p.title, p.slug, p.content, p.excerpt, p.status, \
    p.published_at, p.scheduled_at, \
    ARRAY(SELECT pt.tag_id FROM post_tags pt WHERE pt.post_id = p.id ORDER BY pt.tag_id) AS tag_ids, \
    p.created_at, p.updated_at";

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: EntityId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn fetch_in(tx: &mut Transaction<'_, Postgres>, id: i64) -> DomainResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        Post::try_from(row)
    }

    async fn set_tags_in(
        tx: &mut Transaction<'_, Postgres>,
        post_id: i64,
        tag_ids: &[EntityId],
    ) -> DomainResult<()> {
        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(i64::from(*tag_id))
                .execute(&mut **tx)
                .await
                .map_err(map_sqlx)?;
        }

        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    content: String,
    excerpt: Option<String>,
    status: String,
    published_at: Option<DateTime<Utc>>,
    scheduled_at: Option<DateTime<Utc>>,
    tag_ids: Vec<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EntityId::new(row.id)?,
            title: Title::new(row.title)?,
            slug: Slug::new(row.slug)?,
            content: row.content,
            excerpt: row.excerpt,
            status: row.status.parse::<PostStatus>()?,
            published_at: row.published_at,
            scheduled_at: row.scheduled_at,
            tag_ids: row
                .tag_ids
                .into_iter()
                .map(EntityId::new)
                .collect::<DomainResult<_>>()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            slug,
            content,
            excerpt,
            publication,
            tag_ids,
            created_at,
            updated_at,
        } = post;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO posts (title, slug, content, excerpt, status, published_at, scheduled_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(content)
        .bind(excerpt)
        .bind(publication.status.as_str())
        .bind(publication.published_at)
        .bind(publication.scheduled_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if !tag_ids.is_empty() {
            Self::set_tags_in(&mut tx, id, &tag_ids).await?;
        }
        let created = Self::fetch_in(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            slug,
            content,
            excerpt,
            publication,
            tag_ids,
            expected_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }

        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(content);
        }

        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt);
        }

        if let Some(publication) = publication {
            builder.push(", status = ");
            builder.push_bind(publication.status.as_str());
            builder.push(", published_at = ");
            builder.push_bind(publication.published_at);
            builder.push(", scheduled_at = ");
            builder.push_bind(publication.scheduled_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        if let Some(expected) = expected_updated_at {
            builder.push(" AND updated_at = ");
            builder.push_bind(expected);
        }
        builder.push(" RETURNING id");

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let updated_id = builder
            .build_query_scalar::<i64>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let Some(updated_id) = updated_id else {
            tx.rollback().await.map_err(map_sqlx)?;
            // No row: either the post is gone or the guard on `updated_at` failed.
            if expected_updated_at.is_some() && self.exists(id).await? {
                return Err(DomainError::ConcurrentModification(
                    "post was modified concurrently, please refresh and try again".into(),
                ));
            }
            return Err(DomainError::NotFound(format!("post {id} not found")));
        };

        if let Some(tag_ids) = tag_ids {
            Self::set_tags_in(&mut tx, updated_id, &tag_ids).await?;
        }
        let updated = Self::fetch_in(&mut tx, updated_id).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts p WHERE p.slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("post {id} not found")));
        }
        Ok(())
    }
}
