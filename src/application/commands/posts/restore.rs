use super::PostCommandService;
use crate::{
    application::{
        dto::RestoreOutcomeDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{content::EntityId, revision::RevisionId},
};
use chrono::{DateTime, Utc};

pub struct RestoreRevisionCommand {
    pub post_id: i64,
    pub revision_id: i64,
    /// Omit to restore without a freshness check.
    pub expected_updated_at: Option<DateTime<Utc>>,
}

pub struct DeleteRevisionCommand {
    pub revision_id: i64,
}

impl PostCommandService {
    pub async fn restore_revision(
        &self,
        command: RestoreRevisionCommand,
    ) -> ApplicationResult<RestoreOutcomeDto> {
        let post_id = EntityId::new(command.post_id)?;
        let revision_id = RevisionId::new(command.revision_id)?;

        let revision = self
            .revisions
            .find_by_id(revision_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("revision {revision_id} not found"))
            })?;
        let post = self.load_post(post_id).await?;

        let outcome = self
            .guard
            .restore(&post, &revision, command.expected_updated_at)
            .await?;
        Ok(outcome.into())
    }

    pub async fn delete_revision(&self, command: DeleteRevisionCommand) -> ApplicationResult<()> {
        let revision_id = RevisionId::new(command.revision_id)?;
        let revision = self
            .revisions
            .find_by_id(revision_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("revision {revision_id} not found"))
            })?;

        self.revisions.delete(revision.id).await?;
        tracing::info!(
            post_id = %revision.post_id,
            version = %revision.version,
            "deleted revision"
        );
        Ok(())
    }
}
