//! Direct-link confirmation - token-verified self-attachment
//!
//! Second onboarding path: the invitee already proved control of the
//! invited email out-of-band (link token verified at the auth boundary),
//! so membership is granted directly, skipping the pending state.

use futures::future::join_all;
use tracing::{info, warn};

use crate::common::RegistryError;
use crate::domains::founder::models::User;
use crate::domains::startup::models::Startup;
use crate::kernel::{BaseNotifier as _, BaseUserStore as _, RegistryDeps};

/// Attach an authenticated user directly to a startup as a member.
///
/// Requires the user to have no current startup. Clears the one-time link
/// verifier and any pending pointer to this same startup, then announces
/// the new cofounder to every pre-existing member (best-effort).
pub async fn confirm_link(
    deps: &RegistryDeps,
    user: &User,
    startup: &Startup,
    title: Option<&str>,
) -> Result<User, RegistryError> {
    if user.startup_id.is_some() {
        return Err(RegistryError::UserAlreadyMemberOfStartup);
    }

    // Snapshot the roster before the claim so the new member is excluded
    // from their own announcement.
    let roster = deps.users.list_members(startup.id).await?;

    let Some(joined) = deps.users.claim_startup(user.id, startup.id, title).await? else {
        // Guard failed: re-read to pick the right error code.
        let current = deps
            .users
            .find_by_id(user.id)
            .await?
            .ok_or(RegistryError::FounderMissing)?;
        if current.startup_id.is_some() {
            return Err(RegistryError::UserAlreadyMemberOfStartup);
        }
        return Err(RegistryError::UserHasPendingStartupInvite);
    };

    info!("User {} joined startup {} via link", joined.id, startup.id);

    let notices = roster
        .iter()
        .map(|member| deps.notifier.send_cofounder_joined(member, &joined, startup));
    for (member, result) in roster.iter().zip(join_all(notices).await) {
        if let Err(e) = result {
            warn!("Failed to notify {} of new cofounder: {}", member.email, e);
        }
    }

    Ok(joined)
}
