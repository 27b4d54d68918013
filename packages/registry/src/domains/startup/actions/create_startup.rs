//! Create startup action

use tracing::info;

use crate::common::RegistryError;
use crate::domains::founder::models::User;
use crate::domains::startup::models::Startup;
use crate::kernel::{BaseStartupStore as _, BaseUserStore as _, RegistryDeps};

/// Found a new startup for the acting user.
///
/// A user can hold at most one startup; the membership claim is atomic so
/// two concurrent creations cannot both attach.
pub async fn create_startup(
    deps: &RegistryDeps,
    actor: &User,
    name: Option<&str>,
) -> Result<(Startup, User), RegistryError> {
    if actor.startup_id.is_some() {
        return Err(RegistryError::UserAlreadyHasStartup);
    }

    let startup = deps
        .startups
        .insert(Startup::new(name.unwrap_or_default()))
        .await?;

    let Some(founder) = deps.users.claim_startup(actor.id, startup.id, None).await? else {
        let current = deps
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or(RegistryError::FounderMissing)?;
        if current.startup_id.is_some() {
            return Err(RegistryError::UserAlreadyHasStartup);
        }
        return Err(RegistryError::UserHasPendingStartupInvite);
    };

    info!("User {} founded startup {}", founder.id, startup.id);
    Ok((startup, founder))
}
