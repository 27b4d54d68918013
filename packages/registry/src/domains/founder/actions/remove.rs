//! Remove action - rescind a pending cofounder invitation

use tracing::info;

use crate::common::RegistryError;
use crate::domains::founder::models::User;
use crate::domains::startup::models::Startup;
use crate::kernel::{BasePartnershipStore as _, BaseUserStore as _, RegistryDeps};

use super::ensure_authorized;

/// Rescind a pending invitation.
///
/// A pending invitee with no other references is a placeholder and is
/// deleted outright. An identity that already accumulated partnership
/// records elsewhere is soft-detached instead (pending pointer cleared,
/// row kept), so the delete cannot orphan those records.
pub async fn remove(
    deps: &RegistryDeps,
    actor: &User,
    startup: &Startup,
    email: &str,
) -> Result<(), RegistryError> {
    ensure_authorized(actor, startup)?;

    let user = deps
        .users
        .find_by_email(email)
        .await?
        .ok_or(RegistryError::FounderMissing)?;

    let Some(pending_id) = user.pending_startup_id else {
        return Err(RegistryError::UserIsNotPendingFounder);
    };
    if pending_id != startup.id {
        return Err(RegistryError::UserPendingStartupMismatch);
    }

    if deps.partnerships.count_for_user(user.id).await? > 0 {
        deps.users.clear_pending_startup(user.id).await?;
        info!("Detached pending cofounder {} (referenced elsewhere)", user.id);
    } else {
        deps.users.delete(user.id).await?;
        info!("Deleted pending cofounder placeholder {}", user.id);
    }

    Ok(())
}
