// src/application/commands/projects.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::retry::{requested_slug, resolve_slug, retry_write_race},
        dto::ProjectDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        content::{EntityId, NewProject, ProjectRepository, ProjectUpdate, Title},
        slug::{SlugNamespace, SlugService},
    },
};

pub struct CreateProjectCommand {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

pub struct UpdateProjectCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct DeleteProjectCommand {
    pub id: i64,
}

pub struct ProjectCommandService {
    projects: Arc<dyn ProjectRepository>,
    slug_service: Arc<SlugService>,
    clock: Arc<dyn Clock>,
    write_retry_limit: u32,
}

impl ProjectCommandService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        slug_service: Arc<SlugService>,
        clock: Arc<dyn Clock>,
        write_retry_limit: u32,
    ) -> Self {
        Self {
            projects,
            slug_service,
            clock,
            write_retry_limit,
        }
    }

    pub async fn create_project(
        &self,
        command: CreateProjectCommand,
    ) -> ApplicationResult<ProjectDto> {
        let title = Title::new(command.title)?;
        let description = command.description;
        let requested = requested_slug(command.slug);
        let now = self.clock.now();

        let slugs = self.slug_service.as_ref();
        let projects = self.projects.as_ref();
        let (title, description, requested) = (&title, &description, &requested);

        let created = retry_write_race(self.write_retry_limit, "create project", move || async move {
            let slug = resolve_slug(
                slugs,
                SlugNamespace::Projects,
                title.as_str(),
                requested.as_deref(),
                None,
            )
            .await?;

            projects
                .insert(NewProject {
                    title: title.clone(),
                    slug,
                    description: description.clone(),
                    created_at: now,
                    updated_at: now,
                })
                .await
        })
        .await?;

        tracing::info!(project_id = %created.id, slug = %created.slug, "created project");
        Ok(created.into())
    }

    /// Rename and/or re-describe a project. A new title without an explicit
    /// slug re-derives the slug, keeping the project's own slug when it still fits.
    pub async fn update_project(
        &self,
        command: UpdateProjectCommand,
    ) -> ApplicationResult<ProjectDto> {
        let id = EntityId::new(command.id)?;
        let project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("project {id} not found")))?;

        let title = command.title.map(Title::new).transpose()?;
        let requested = requested_slug(command.slug)
            .filter(|requested| requested.as_str() != project.slug.as_str());
        let description = command.description;

        let slugs = self.slug_service.as_ref();
        let projects = self.projects.as_ref();
        let clock = self.clock.as_ref();
        let (current_title, title, description, requested) =
            (&project.title, &title, &description, &requested);

        let updated = retry_write_race(self.write_retry_limit, "update project", move || async move {
            let mut update = ProjectUpdate::new(id, clock.now());

            if requested.is_some() || title.is_some() {
                let text = title.as_ref().unwrap_or(current_title);
                let slug = resolve_slug(
                    slugs,
                    SlugNamespace::Projects,
                    text.as_str(),
                    requested.as_deref(),
                    Some(id),
                )
                .await?;
                update = update.with_slug(slug);
            }
            if let Some(title) = title {
                update = update.with_title(title.clone());
            }
            if let Some(description) = description {
                update = update.with_description(description.clone());
            }

            projects.update(update).await
        })
        .await?;

        Ok(updated.into())
    }

    /// Deleting a missing project is `NotFound`.
    pub async fn delete_project(&self, command: DeleteProjectCommand) -> ApplicationResult<()> {
        let id = EntityId::new(command.id)?;
        self.projects.delete(id).await?;
        tracing::info!(project_id = %id, "deleted project");
        Ok(())
    }
}
