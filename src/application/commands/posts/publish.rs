// src/application/commands/posts/publish.rs
use super::PostCommandService;
use crate::{
    application::{dto::PostDto, error::ApplicationResult},
    domain::content::{EntityId, Post, PostUpdate, Publication},
};

pub struct SetPublishStateCommand {
    pub id: i64,
    pub publish: bool,
}

pub struct ArchivePostCommand {
    pub id: i64,
}

impl PostCommandService {
    /// Publishing stamps `published_at` and clears any schedule; unpublishing
    /// returns the post to a draft. Repeating the current state is rejected.
    pub async fn set_publish_state(
        &self,
        command: SetPublishStateCommand,
    ) -> ApplicationResult<PostDto> {
        let id = EntityId::new(command.id)?;
        let post = self.load_post(id).await?;

        let publication = if command.publish {
            post.publication().publish(self.clock.now())?
        } else {
            post.publication().unpublish()?
        };

        let updated = self.write_publication(&post, publication).await?;
        tracing::info!(post_id = %updated.id, status = %updated.status, "changed publish state");
        Ok(updated.into())
    }

    pub async fn archive_post(&self, command: ArchivePostCommand) -> ApplicationResult<PostDto> {
        let id = EntityId::new(command.id)?;
        let post = self.load_post(id).await?;

        let publication = post.publication().archive()?;

        let updated = self.write_publication(&post, publication).await?;
        tracing::info!(post_id = %updated.id, "archived post");
        Ok(updated.into())
    }

    /// Conditional on the `updated_at` just read; content is untouched, so no
    /// revision is recorded.
    async fn write_publication(
        &self,
        post: &Post,
        publication: Publication,
    ) -> ApplicationResult<Post> {
        let update = PostUpdate::new(post.id, self.clock.now())
            .expecting(post.updated_at)
            .with_publication(publication);
        Ok(self.posts.update(update).await?)
    }
}
