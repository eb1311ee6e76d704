// src/infrastructure/repositories/postgres_revision.rs
use super::map_sqlx;
use crate::domain::content::EntityId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::revision::{
    NewRevision, Revision, RevisionContent, RevisionId, RevisionRepository, RevisionVersion,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const REVISION_COLUMNS: &str = "id, post_id, version, content, excerpt, created_at";

#[derive(Clone)]
pub struct PostgresRevisionRepository {
    pool: PgPool,
}

impl PostgresRevisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn post_exists(&self, post_id: EntityId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(i64::from(post_id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

#[derive(Debug, FromRow)]
struct RevisionRow {
    id: i64,
    post_id: i64,
    version: i32,
    content: String,
    excerpt: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RevisionRow> for Revision {
    type Error = DomainError;

    fn try_from(row: RevisionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RevisionId::new(row.id)?,
            post_id: EntityId::new(row.post_id)?,
            version: RevisionVersion::new(row.version)?,
            content: RevisionContent::new(row.content, row.excerpt),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl RevisionRepository for PostgresRevisionRepository {
    async fn highest_claimed_version(
        &self,
        post_id: EntityId,
    ) -> DomainResult<Option<RevisionVersion>> {
        let claimed = sqlx::query_scalar::<_, i32>(
            "SELECT last_revision_version FROM posts WHERE id = $1",
        )
        .bind(i64::from(post_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        // 0 means nothing claimed yet; a missing post surfaces on insert.
        claimed
            .filter(|version| *version > 0)
            .map(RevisionVersion::new)
            .transpose()
    }

    async fn insert(&self, revision: NewRevision) -> DomainResult<Revision> {
        let post_id = revision.post_id;
        let version = revision.version;
        let (content, excerpt) = revision.content.into_parts();

        // The high-water mark moves in the same statement as the insert, and
        // only forwards, so a deleted version is never handed out again.
        let row = sqlx::query_as::<_, RevisionRow>(&format!(
            "WITH claimed AS (
                 UPDATE posts SET last_revision_version = $2
                 WHERE id = $1 AND last_revision_version < $2
                 RETURNING id
             )
             INSERT INTO post_revisions (post_id, version, content, excerpt, created_at)
             SELECT id, $2, $3::TEXT, $4::TEXT, $5::TIMESTAMPTZ FROM claimed
             RETURNING {REVISION_COLUMNS}"
        ))
        .bind(i64::from(post_id))
        .bind(i32::from(version))
        .bind(content)
        .bind(excerpt)
        .bind(revision.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Revision::try_from(row),
            None if self.post_exists(post_id).await? => Err(DomainError::VersionTaken(format!(
                "version {version} already claimed for post {post_id}"
            ))),
            None => Err(DomainError::NotFound(format!("post {post_id} not found"))),
        }
    }

    async fn find_by_id(&self, id: RevisionId) -> DomainResult<Option<Revision>> {
        let row = sqlx::query_as::<_, RevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM post_revisions WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Revision::try_from).transpose()
    }

    async fn find_by_version(
        &self,
        post_id: EntityId,
        version: RevisionVersion,
    ) -> DomainResult<Option<Revision>> {
        let row = sqlx::query_as::<_, RevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM post_revisions WHERE post_id = $1 AND version = $2"
        ))
        .bind(i64::from(post_id))
        .bind(i32::from(version))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Revision::try_from).transpose()
    }

    async fn latest(&self, post_id: EntityId) -> DomainResult<Option<Revision>> {
        let row = sqlx::query_as::<_, RevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM post_revisions
             WHERE post_id = $1
             ORDER BY version DESC
             LIMIT 1"
        ))
        .bind(i64::from(post_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Revision::try_from).transpose()
    }

    async fn list_by_post(&self, post_id: EntityId) -> DomainResult<Vec<Revision>> {
        let rows = sqlx::query_as::<_, RevisionRow>(&format!(
            "SELECT {REVISION_COLUMNS} FROM post_revisions
             WHERE post_id = $1
             ORDER BY version DESC"
        ))
        .bind(i64::from(post_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Revision::try_from).collect()
    }

    async fn count_by_post(&self, post_id: EntityId) -> DomainResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM post_revisions WHERE post_id = $1",
        )
        .bind(i64::from(post_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        u64::try_from(count).map_err(|_| DomainError::Persistence("negative row count".into()))
    }

    async fn delete(&self, id: RevisionId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM post_revisions WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("revision {id} not found")));
        }
        Ok(())
    }
}
