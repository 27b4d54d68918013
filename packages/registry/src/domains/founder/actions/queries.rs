//! Ledger queries - who belongs to a startup, and in what state

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::RegistryError;
use crate::domains::founder::models::{CofounderStatus, User};
use crate::domains::startup::models::Startup;
use crate::kernel::{BaseUserStore as _, RegistryDeps};

use super::ensure_authorized;

/// One roster entry with its derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderStatus {
    pub fullname: String,
    pub email: String,
    pub status: CofounderStatus,
}

impl FounderStatus {
    fn of(user: &User, startup: &Startup) -> Self {
        Self {
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            status: user.cofounder_status(startup.id),
        }
    }
}

/// Cofounder statuses for a startup, visible to its members only.
///
/// With `emails`, resolves exactly those addresses in input order; unknown
/// addresses are skipped (only mutating operations raise `FounderMissing`).
/// Without, returns the union of current members and pending invitees,
/// members first.
pub async fn list_statuses(
    deps: &RegistryDeps,
    actor: &User,
    startup: &Startup,
    emails: Option<&[String]>,
) -> Result<Vec<FounderStatus>, RegistryError> {
    ensure_authorized(actor, startup)?;

    let Some(emails) = emails else {
        let members = deps.users.list_members(startup.id).await?;
        let pending = deps.users.list_pending(startup.id).await?;
        return Ok(members
            .iter()
            .chain(pending.iter())
            .map(|u| FounderStatus::of(u, startup))
            .collect());
    };

    let mut statuses = Vec::with_capacity(emails.len());
    for email in emails {
        match deps.users.find_by_email(email).await? {
            Some(user) => statuses.push(FounderStatus::of(&user, startup)),
            None => debug!("No user for email {} in status query, skipping", email),
        }
    }
    Ok(statuses)
}
