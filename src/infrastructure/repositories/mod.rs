// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_post;
mod postgres_project;
mod postgres_revision;
mod postgres_slug;
mod postgres_tag;

pub use error::map_sqlx;
pub use postgres_post::PostgresPostRepository;
pub use postgres_project::PostgresProjectRepository;
pub use postgres_revision::PostgresRevisionRepository;
pub use postgres_slug::PostgresSlugLookup;
pub use postgres_tag::PostgresTagRepository;

use crate::application::services::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

/// Postgres adapters for every repository port, sharing one pool.
pub fn postgres_repositories(pool: &PgPool) -> Repositories {
    Repositories {
        posts: Arc::new(PostgresPostRepository::new(pool.clone())),
        projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        tags: Arc::new(PostgresTagRepository::new(pool.clone())),
        revisions: Arc::new(PostgresRevisionRepository::new(pool.clone())),
        slugs: Arc::new(PostgresSlugLookup::new(pool.clone())),
    }
}
