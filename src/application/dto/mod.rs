pub mod content;
pub mod revisions;

pub use content::{PostDto, PostSummaryDto, ProjectDto, TagDto};
pub use revisions::{RestoreOutcomeDto, RevisionDto, RevisionHistoryDto, RevisionRefDto};
