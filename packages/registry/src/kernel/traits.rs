// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The membership
// rules live in domain actions that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseUserStore).
//
// The claim_* methods are atomic conditional writes: they mutate the row
// only while its guard column is still unset and return the updated row,
// or None when the guard fails. This closes the check-then-act race on the
// one-startup-per-user invariants; action-level pre-checks exist only to
// pick the right error code.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{StartupId, UserId};
use crate::domains::founder::models::User;
use crate::domains::startup::models::{Partnership, RegistrationDetails, RegistrationType, Startup};

// =============================================================================
// User Store Trait (Infrastructure - identity records)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Emails are unique across all users.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a new user row. Fails on a duplicate email.
    async fn insert(&self, user: User) -> Result<User>;

    /// Atomically set `pending_startup_id` while both membership pointers
    /// are unset. Returns None when the user already has a startup or a
    /// pending invite (possibly set concurrently).
    async fn claim_pending_startup(
        &self,
        id: UserId,
        startup_id: StartupId,
    ) -> Result<Option<User>>;

    /// Atomically set `startup_id` while the user has no startup and no
    /// pending invite to a *different* startup. Clears the pending pointer
    /// (membership supersedes pending) and the link verifier token, and
    /// sets the title when supplied. Returns None when the guard fails.
    async fn claim_startup(
        &self,
        id: UserId,
        startup_id: StartupId,
        title: Option<&str>,
    ) -> Result<Option<User>>;

    /// Soft detach: drop the pending pointer but keep the row.
    async fn clear_pending_startup(&self, id: UserId) -> Result<()>;

    /// Permanently remove the user row.
    async fn delete(&self, id: UserId) -> Result<()>;

    /// Active members of a startup, oldest first.
    async fn list_members(&self, startup_id: StartupId) -> Result<Vec<User>>;

    /// Users with a pending invite to a startup, oldest first.
    async fn list_pending(&self, startup_id: StartupId) -> Result<Vec<User>>;
}

// =============================================================================
// Startup Store Trait (Infrastructure - organization records)
// =============================================================================

#[async_trait]
pub trait BaseStartupStore: Send + Sync {
    async fn find_by_id(&self, id: StartupId) -> Result<Option<Startup>>;

    async fn insert(&self, startup: Startup) -> Result<Startup>;

    /// Atomic unset -> pending transition of the approval status. Returns
    /// None when the status is already set.
    async fn set_approval_pending(&self, id: StartupId) -> Result<Option<Startup>>;

    /// Atomically persist the registration type and legal fields while the
    /// startup is still unregistered. Returns None when a registration
    /// type is already present.
    async fn apply_registration(
        &self,
        id: StartupId,
        registration_type: RegistrationType,
        details: &RegistrationDetails,
    ) -> Result<Option<Startup>>;
}

// =============================================================================
// Partnership Store Trait (Infrastructure - legal partner records)
// =============================================================================

#[async_trait]
pub trait BasePartnershipStore: Send + Sync {
    async fn insert(&self, partnership: Partnership) -> Result<Partnership>;

    /// Partnerships of a startup in creation order.
    async fn list_for_startup(&self, startup_id: StartupId) -> Result<Vec<Partnership>>;

    /// Number of partnerships referencing a user (reference-check guard
    /// before deleting placeholder rows).
    async fn count_for_user(&self, user_id: UserId) -> Result<i64>;
}

// =============================================================================
// Notifier Trait (Infrastructure - email / in-app delivery)
// =============================================================================

/// Outbound notification dispatch. Best-effort: callers log failures and
/// never surface them; delivery never rolls back a membership mutation.
#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Invitation email to a newly created placeholder user. The token is
    /// embedded in the activation link.
    async fn send_cofounder_invitation(
        &self,
        invitee: &User,
        startup: &Startup,
        inviter: &User,
        token: &str,
    ) -> Result<()>;

    /// Invite notice to an existing user with an activated account. The
    /// channel (email vs in-app) is the implementation's policy call.
    async fn send_cofounder_invite_notice(
        &self,
        invitee: &User,
        startup: &Startup,
        inviter: &User,
    ) -> Result<()>;

    /// Announcement to an existing member that a new cofounder joined.
    async fn send_cofounder_joined(
        &self,
        recipient: &User,
        new_member: &User,
        startup: &Startup,
    ) -> Result<()>;
}
