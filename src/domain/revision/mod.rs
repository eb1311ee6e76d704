pub mod entity;
pub mod guard;
pub mod repository;
pub mod value_objects;

pub use entity::{NewRevision, Revision, RevisionRef};
pub use guard::{RestoreOutcome, RevisionGuard, ensure_fresh, ensure_owned_by};
pub use repository::RevisionRepository;
pub use value_objects::{RevisionContent, RevisionId, RevisionVersion};
