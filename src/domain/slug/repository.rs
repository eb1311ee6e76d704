use crate::domain::content::EntityId;
use crate::domain::errors::DomainResult;
use crate::domain::slug::value_objects::{Slug, SlugNamespace};
use async_trait::async_trait;

#[async_trait]
pub trait SlugLookup: Send + Sync {
    /// Whether `slug` is held by a live entity in `namespace`, ignoring `exclude`.
    async fn slug_exists(
        &self,
        namespace: SlugNamespace,
        slug: &Slug,
        exclude: Option<EntityId>,
    ) -> DomainResult<bool>;
}
