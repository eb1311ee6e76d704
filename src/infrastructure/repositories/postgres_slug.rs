use super::map_sqlx;
use crate::domain::content::EntityId;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugLookup, SlugNamespace};
use async_trait::async_trait;
use sqlx::PgPool;

/// Slug existence checks against the table that backs each namespace.
#[derive(Clone)]
pub struct PostgresSlugLookup {
    pool: PgPool,
}

impl PostgresSlugLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_for(namespace: SlugNamespace) -> &'static str {
    match namespace {
        SlugNamespace::Posts => "posts",
        SlugNamespace::Projects => "projects",
        SlugNamespace::Tags => "tags",
    }
}

#[async_trait]
impl SlugLookup for PostgresSlugLookup {
    async fn slug_exists(
        &self,
        namespace: SlugNamespace,
        slug: &Slug,
        exclude: Option<EntityId>,
    ) -> DomainResult<bool> {
        let sql = format!(
            "SELECT EXISTS(
                SELECT 1 FROM {} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
            table_for(namespace)
        );

        sqlx::query_scalar::<_, bool>(&sql)
            .bind(slug.as_str())
            .bind(exclude.map(i64::from))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
