pub mod content;
pub mod revisions;

pub use content::ContentQueryService;
pub use revisions::RevisionQueryService;
