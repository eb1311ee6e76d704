use super::PostCommandService;
use crate::{application::error::ApplicationResult, domain::content::EntityId};

pub struct DeletePostCommand {
    pub id: i64,
}

impl PostCommandService {
    /// Removes the post together with its revisions and tag links.
    pub async fn delete_post(&self, command: DeletePostCommand) -> ApplicationResult<()> {
        let id = EntityId::new(command.id)?;
        let post = self.load_post(id).await?;

        self.posts.delete(post.id).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "deleted post");
        Ok(())
    }
}
