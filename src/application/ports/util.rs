// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Base slug for `input`; may be empty when the input has no slug characters.
    fn slugify(&self, input: &str) -> String;
}
