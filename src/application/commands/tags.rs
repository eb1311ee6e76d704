// src/application/commands/tags.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::retry::{requested_slug, resolve_slug, retry_write_race},
        dto::TagDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        content::{EntityId, NewTag, TagRepository, TagUpdate, Title},
        slug::{SlugNamespace, SlugService},
    },
};

pub struct CreateTagCommand {
    pub name: String,
    pub slug: Option<String>,
}

pub struct UpdateTagCommand {
    pub id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct DeleteTagCommand {
    pub id: i64,
}

pub struct TagCommandService {
    tags: Arc<dyn TagRepository>,
    slug_service: Arc<SlugService>,
    clock: Arc<dyn Clock>,
    write_retry_limit: u32,
}

impl TagCommandService {
    pub fn new(
        tags: Arc<dyn TagRepository>,
        slug_service: Arc<SlugService>,
        clock: Arc<dyn Clock>,
        write_retry_limit: u32,
    ) -> Self {
        Self {
            tags,
            slug_service,
            clock,
            write_retry_limit,
        }
    }

    pub async fn create_tag(&self, command: CreateTagCommand) -> ApplicationResult<TagDto> {
        let name = Title::new(command.name)?;
        let requested = requested_slug(command.slug);
        let now = self.clock.now();

        let slugs = self.slug_service.as_ref();
        let tags = self.tags.as_ref();
        let (name, requested) = (&name, &requested);

        let created = retry_write_race(self.write_retry_limit, "create tag", move || async move {
            let slug = resolve_slug(
                slugs,
                SlugNamespace::Tags,
                name.as_str(),
                requested.as_deref(),
                None,
            )
            .await?;

            tags.insert(NewTag {
                name: name.clone(),
                slug,
                created_at: now,
                updated_at: now,
            })
            .await
        })
        .await?;

        tracing::info!(tag_id = %created.id, slug = %created.slug, "created tag");
        Ok(created.into())
    }

    pub async fn update_tag(&self, command: UpdateTagCommand) -> ApplicationResult<TagDto> {
        let id = EntityId::new(command.id)?;
        let tag = self
            .tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("tag {id} not found")))?;

        let name = command.name.map(Title::new).transpose()?;
        let requested = requested_slug(command.slug)
            .filter(|requested| requested.as_str() != tag.slug.as_str());

        if name.is_none() && requested.is_none() {
            return Ok(tag.into());
        }

        let slugs = self.slug_service.as_ref();
        let tags = self.tags.as_ref();
        let clock = self.clock.as_ref();
        let (current_name, name, requested) = (&tag.name, &name, &requested);

        let updated = retry_write_race(self.write_retry_limit, "update tag", move || async move {
            let text = name.as_ref().unwrap_or(current_name);
            let slug = resolve_slug(
                slugs,
                SlugNamespace::Tags,
                text.as_str(),
                requested.as_deref(),
                Some(id),
            )
            .await?;

            let mut update = TagUpdate::new(id, clock.now()).with_slug(slug);
            if let Some(name) = name {
                update = update.with_name(name.clone());
            }
            tags.update(update).await
        })
        .await?;

        Ok(updated.into())
    }

    /// Also detaches the tag from every post that carried it.
    pub async fn delete_tag(&self, command: DeleteTagCommand) -> ApplicationResult<()> {
        let id = EntityId::new(command.id)?;
        self.tags.delete(id).await?;
        tracing::info!(tag_id = %id, "deleted tag");
        Ok(())
    }
}
