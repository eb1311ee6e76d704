// src/application/commands/posts/mod.rs
mod create;
mod delete;
mod publish;
mod restore;
mod service;
mod update;

pub use create::{CreatePostCommand, CreatePostCommandBuilder};
pub use delete::DeletePostCommand;
pub use publish::{ArchivePostCommand, SetPublishStateCommand};
pub use restore::{DeleteRevisionCommand, RestoreRevisionCommand};
pub use service::PostCommandService;
pub use update::UpdatePostCommand;
