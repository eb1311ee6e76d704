// tests/support/builders.rs
use std::sync::Arc;

use folio_core::application::ports::time::Clock;
use folio_core::application::services::ApplicationServices;
use folio_core::domain::revision::RevisionGuard;
use folio_core::infrastructure::util::DefaultSlugGenerator;

use super::mocks::{InMemoryStore, SteppingClock};

pub const RETRY_LIMIT: u32 = 3;

/// Services wired to `store` with a clock that ticks once per call.
pub fn services(store: &Arc<InMemoryStore>) -> ApplicationServices {
    services_with_clock(store, Arc::new(SteppingClock::default()))
}

pub fn services_with_clock(
    store: &Arc<InMemoryStore>,
    clock: Arc<dyn Clock>,
) -> ApplicationServices {
    ApplicationServices::new(
        store.repositories(),
        clock,
        Arc::new(DefaultSlugGenerator),
        RETRY_LIMIT,
    )
}

pub fn guard(store: &Arc<InMemoryStore>) -> RevisionGuard {
    RevisionGuard::new(
        store.clone(),
        store.clone(),
        Arc::new(SteppingClock::default()),
        RETRY_LIMIT,
    )
}
