pub mod allocator;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use allocator::allocate_unique;
pub use repository::SlugLookup;
pub use services::SlugService;
pub use value_objects::{Slug, SlugNamespace, is_valid_slug, normalize};
