//! Registry dependencies for domain actions (using traits for testability)
//!
//! Central dependency container passed into every action. All external
//! services hide behind the trait abstractions in kernel/traits.rs so tests
//! can inject the in-memory implementations.

use std::sync::Arc;

use sqlx::PgPool;

use super::pg_store::PgStore;
use super::traits::{BaseNotifier, BasePartnershipStore, BaseStartupStore, BaseUserStore};

/// Dependencies accessible to domain actions.
#[derive(Clone)]
pub struct RegistryDeps {
    pub users: Arc<dyn BaseUserStore>,
    pub startups: Arc<dyn BaseStartupStore>,
    pub partnerships: Arc<dyn BasePartnershipStore>,
    pub notifier: Arc<dyn BaseNotifier>,
}

impl RegistryDeps {
    pub fn new(
        users: Arc<dyn BaseUserStore>,
        startups: Arc<dyn BaseStartupStore>,
        partnerships: Arc<dyn BasePartnershipStore>,
        notifier: Arc<dyn BaseNotifier>,
    ) -> Self {
        Self {
            users,
            startups,
            partnerships,
            notifier,
        }
    }

    /// Production wiring: all three stores backed by Postgres.
    pub fn postgres(pool: PgPool, notifier: Arc<dyn BaseNotifier>) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            users: store.clone(),
            startups: store.clone(),
            partnerships: store,
            notifier,
        }
    }
}
