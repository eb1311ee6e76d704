use super::map_sqlx;
use crate::domain::content::{
    EntityId, NewProject, Project, ProjectRepository, ProjectUpdate, Title,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const PROJECT_COLUMNS: &str = "id, title, slug, description, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: i64,
    title: String,
    slug: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = DomainError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EntityId::new(row.id)?,
            title: Title::new(row.title)?,
            slug: Slug::new(row.slug)?,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn insert(&self, project: NewProject) -> DomainResult<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "INSERT INTO projects (title, slug, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(project.title.as_str())
        .bind(project.slug.as_str())
        .bind(project.description)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Project::try_from(row)
    }

    async fn update(&self, update: ProjectUpdate) -> DomainResult<Project> {
        let ProjectUpdate {
            id,
            title,
            slug,
            description,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE projects SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING ");
        builder.push(PROJECT_COLUMNS);

        let row = builder
            .build_query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("project {id} not found")))?;

        Project::try_from(row)
    }

    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Project::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Project::try_from).transpose()
    }

    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("project {id} not found")));
        }
        Ok(())
    }
}
