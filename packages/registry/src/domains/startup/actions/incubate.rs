//! Incubate action - submit a startup for incubation approval

use tracing::info;

use crate::common::RegistryError;
use crate::domains::founder::actions::ensure_authorized;
use crate::domains::founder::models::User;
use crate::domains::startup::models::Startup;
use crate::kernel::{BaseStartupStore as _, RegistryDeps};

/// Move a startup's approval status from unset to pending.
///
/// Any other current status fails `StartupInvalidApprovalState`; the
/// transition itself is an atomic conditional update.
pub async fn incubate(
    deps: &RegistryDeps,
    actor: &User,
    startup: &Startup,
) -> Result<Startup, RegistryError> {
    ensure_authorized(actor, startup)?;

    let updated = deps
        .startups
        .set_approval_pending(startup.id)
        .await?
        .ok_or(RegistryError::StartupInvalidApprovalState)?;

    info!("Startup {} submitted for incubation", updated.id);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::startup::models::ApprovalStatus;
    use crate::kernel::test_dependencies::memory_deps;

    fn seed_founder(
        store: &crate::kernel::test_dependencies::MemoryStore,
        startup: &Startup,
    ) -> User {
        let mut founder = User::new("founder@example.com", "Founder");
        founder.startup_id = Some(startup.id);
        store.seed_user(founder)
    }

    #[tokio::test]
    async fn test_incubate_sets_pending_from_unset() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, &startup);

        let updated = incubate(&deps, &founder, &startup).await.unwrap();

        assert_eq!(updated.approval_status, Some(ApprovalStatus::Pending));
    }

    #[tokio::test]
    async fn test_incubate_twice_fails() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, &startup);

        incubate(&deps, &founder, &startup).await.unwrap();
        let err = incubate(&deps, &founder, &startup).await.unwrap_err();

        assert_eq!(err.code(), "StartupInvalidApprovalState");
    }

    #[tokio::test]
    async fn test_incubate_requires_authorization() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let other = store.seed_startup(Startup::new("startup 2"));
        let outsider = seed_founder(&store, &other);

        let err = incubate(&deps, &outsider, &startup).await.unwrap_err();

        assert_eq!(err.code(), "AuthorizedUserStartupMismatch");
    }
}
