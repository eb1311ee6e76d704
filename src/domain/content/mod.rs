pub mod lifecycle;
pub mod post;
pub mod project;
pub mod tag;
pub mod value_objects;

pub use lifecycle::{PostStatus, Publication};
pub use post::{NewPost, Post, PostRepository, PostUpdate, normalize_tag_ids};
pub use project::{NewProject, Project, ProjectRepository, ProjectUpdate};
pub use tag::{NewTag, Tag, TagRepository, TagUpdate};
pub use value_objects::{EntityId, Title};
