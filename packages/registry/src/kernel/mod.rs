//! Kernel module - infrastructure and dependency wiring.

pub mod deps;
pub mod pg_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::RegistryDeps;
pub use pg_store::PgStore;
pub use traits::{BaseNotifier, BasePartnershipStore, BaseStartupStore, BaseUserStore};
