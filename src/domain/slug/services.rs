// src/domain/slug/services.rs
use std::sync::Arc;

use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::domain::content::EntityId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::allocator::allocate_unique;
use crate::domain::slug::repository::SlugLookup;
use crate::domain::slug::value_objects::{Slug, SlugNamespace};

/// Domain service responsible for producing unique slugs for every namespace.
pub struct SlugService {
    lookup: Arc<dyn SlugLookup>,
    generator: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl SlugService {
    pub fn new(
        lookup: Arc<dyn SlugLookup>,
        generator: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lookup,
            generator,
            clock,
        }
    }

    /// Slug derived from a title or name. Text without any slug characters
    /// falls back to `<prefix>-<unix seconds>`.
    pub async fn generate_unique_slug(
        &self,
        namespace: SlugNamespace,
        text: &str,
        ignore_id: Option<EntityId>,
    ) -> DomainResult<Slug> {
        let base = self.generator.slugify(text);
        let base = if base.is_empty() {
            let fallback = format!(
                "{}-{}",
                namespace.fallback_prefix(),
                self.clock.now().timestamp()
            );
            tracing::debug!(%namespace, %fallback, "display text has no slug characters");
            fallback
        } else {
            base
        };

        self.allocate(namespace, &Slug::new(base)?, ignore_id).await
    }

    /// Slug requested explicitly by the caller. It is normalized first, so
    /// `"My Custom Slug"` becomes `my-custom-slug` before collision probing.
    pub async fn ensure_unique_slug(
        &self,
        namespace: SlugNamespace,
        requested: &str,
        ignore_id: Option<EntityId>,
    ) -> DomainResult<Slug> {
        let normalized = self.generator.slugify(requested);
        if normalized.is_empty() {
            return Err(DomainError::Validation(
                "slug must contain at least one letter or digit".into(),
            ));
        }

        self.allocate(namespace, &Slug::new(normalized)?, ignore_id)
            .await
    }

    async fn allocate(
        &self,
        namespace: SlugNamespace,
        base: &Slug,
        ignore_id: Option<EntityId>,
    ) -> DomainResult<Slug> {
        let lookup = self.lookup.as_ref();
        let slug = allocate_unique(base, |candidate| async move {
            lookup.slug_exists(namespace, &candidate, ignore_id).await
        })
        .await?;

        tracing::debug!(%namespace, %slug, "allocated slug");
        Ok(slug)
    }
}
