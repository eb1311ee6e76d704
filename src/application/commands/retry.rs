// src/application/commands/retry.rs
use std::future::Future;

use crate::domain::content::EntityId;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugNamespace, SlugService};

/// Run `write` until it stops losing slug/version races to other writers.
///
/// Each attempt must redo its own allocation so that it sees the winner's row.
/// Any other error, or a race lost on the last attempt, is returned as is.
pub(crate) async fn retry_write_race<T, F, Fut>(
    limit: u32,
    action: &str,
    mut write: F,
) -> DomainResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let limit = limit.max(1);
    let mut attempt = 1;
    loop {
        match write().await {
            Err(err) if err.is_write_race() && attempt < limit => {
                tracing::warn!(
                    action,
                    attempt,
                    error = %err,
                    "write lost a uniqueness race, retrying"
                );
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Slug from the caller's explicit request when there is one, otherwise from
/// the display text.
pub(crate) async fn resolve_slug(
    slugs: &SlugService,
    namespace: SlugNamespace,
    text: &str,
    requested: Option<&str>,
    ignore_id: Option<EntityId>,
) -> DomainResult<Slug> {
    match requested {
        Some(requested) => {
            slugs
                .ensure_unique_slug(namespace, requested, ignore_id)
                .await
        }
        None => slugs.generate_unique_slug(namespace, text, ignore_id).await,
    }
}

/// Treat a blank requested slug as no request at all.
pub(crate) fn requested_slug(slug: Option<String>) -> Option<String> {
    slug.filter(|s| !s.trim().is_empty())
}
