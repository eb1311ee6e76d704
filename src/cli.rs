// src/cli.rs
use crate::application::{
    commands::posts::{ArchivePostCommand, RestoreRevisionCommand, SetPublishStateCommand},
    services::ApplicationServices,
};
use crate::domain::slug::SlugNamespace;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Maintenance tool for the folio content store.
#[derive(Parser, Debug)]
#[command(name = "folio_core", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Print the slug that would be allocated for some display text
    Slug {
        /// posts, projects or tags
        namespace: SlugNamespace,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print a post's revision history as JSON
    History { post_id: i64 },
    /// Restore a post to one of its revisions
    Restore {
        post_id: i64,
        revision_id: i64,
        /// The post's `updated_at` as last seen (RFC 3339); skips the freshness check when omitted
        expected_updated_at: Option<DateTime<Utc>>,
    },
    /// Publish a post now
    Publish { post_id: i64 },
    /// Return a published post to draft
    Unpublish { post_id: i64 },
    /// Archive a post
    Archive { post_id: i64 },
}

/// Runs every subcommand except `migrate`, which needs the raw pool.
pub async fn execute(services: &ApplicationServices, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Migrate => anyhow::bail!("migrate is handled before services are built"),
        Command::Slug { namespace, text } => {
            let slug = services
                .slug_service()
                .generate_unique_slug(namespace, &text.join(" "), None)
                .await?;
            Ok(slug.into_inner())
        }
        Command::History { post_id } => {
            let history = services.revision_queries.revision_history(post_id).await?;
            Ok(serde_json::to_string_pretty(&history)?)
        }
        Command::Restore {
            post_id,
            revision_id,
            expected_updated_at,
        } => {
            let outcome = services
                .post_commands
                .restore_revision(RestoreRevisionCommand {
                    post_id,
                    revision_id,
                    expected_updated_at,
                })
                .await?;
            Ok(serde_json::to_string_pretty(&outcome)?)
        }
        Command::Publish { post_id } => set_publish_state(services, post_id, true).await,
        Command::Unpublish { post_id } => set_publish_state(services, post_id, false).await,
        Command::Archive { post_id } => {
            let post = services
                .post_commands
                .archive_post(ArchivePostCommand { id: post_id })
                .await?;
            Ok(serde_json::to_string_pretty(&post)?)
        }
    }
}

async fn set_publish_state(
    services: &ApplicationServices,
    post_id: i64,
    publish: bool,
) -> anyhow::Result<String> {
    let post = services
        .post_commands
        .set_publish_state(SetPublishStateCommand {
            id: post_id,
            publish,
        })
        .await?;
    Ok(serde_json::to_string_pretty(&post)?)
}
