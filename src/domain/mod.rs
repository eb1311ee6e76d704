pub mod content;
pub mod errors;
pub mod revision;
pub mod slug;
