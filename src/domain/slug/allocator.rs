// src/domain/slug/allocator.rs
use std::future::Future;

use crate::domain::errors::DomainResult;
use crate::domain::slug::value_objects::Slug;

/// Return the first of `base`, `base-1`, `base-2`, ... that `exists` reports as free.
///
/// Candidates are checked one at a time in increasing order. Nothing is written;
/// the caller must create the entity with the returned slug and rely on the
/// storage unique constraint to reject a writer that raced it.
pub async fn allocate_unique<F, Fut>(base: &Slug, mut exists: F) -> DomainResult<Slug>
where
    F: FnMut(Slug) -> Fut,
    Fut: Future<Output = DomainResult<bool>>,
{
    let mut candidate = base.clone();
    let mut counter = 0u64;

    while exists(candidate.clone()).await? {
        counter += 1;
        tracing::debug!(taken = %candidate, counter, "slug collision, probing next suffix");
        candidate = base.with_suffix(counter);
    }

    Ok(candidate)
}
