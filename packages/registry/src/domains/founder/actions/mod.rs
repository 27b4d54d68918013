pub mod confirm_link;
pub mod invite;
pub mod queries;
pub mod remove;

pub use confirm_link::confirm_link;
pub use invite::{invite, InviteOutcome};
pub use queries::{list_statuses, FounderStatus};
pub use remove::remove;

use crate::common::RegistryError;
use crate::domains::founder::models::User;
use crate::domains::startup::models::Startup;

/// Guard shared by every mutating roster operation: the acting user must
/// be a current member of the target startup.
pub fn ensure_authorized(actor: &User, startup: &Startup) -> Result<(), RegistryError> {
    if actor.is_authorized_for(startup.id) {
        Ok(())
    } else {
        Err(RegistryError::AuthorizedUserStartupMismatch)
    }
}
