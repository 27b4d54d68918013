use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{StartupId, UserId};

/// A founder's relationship to one startup, derived on the fly.
///
/// Never persisted: `Rejected` only means "no current relation to *this*
/// startup" and would drift immediately if stored as a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CofounderStatus {
    Pending,
    Accepted,
    Rejected,
}

impl CofounderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// User model - a person record, independent of authentication mechanics.
///
/// Uniqueness invariants: at most one active startup (`startup_id`) and at
/// most one pending invitation (`pending_startup_id`) at any time. The
/// stores enforce both with atomic conditional claims; see kernel/traits.rs.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub fullname: String,
    pub title: Option<String>,

    // Membership pointers (at most one of the two is set)
    pub startup_id: Option<StartupId>,
    pub pending_startup_id: Option<StartupId>,

    // Set only when the record was created as an invitation side effect;
    // cleared by account activation (external to this core)
    pub invitation_token: Option<String>,

    // One-time token for direct-link confirmation, cleared on use
    pub startup_link_verifier_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// A plain user record with no startup affiliation.
    pub fn new(email: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            fullname: fullname.into(),
            title: None,
            startup_id: None,
            pending_startup_id: None,
            invitation_token: None,
            startup_link_verifier_id: None,
            created_at: Utc::now(),
        }
    }

    /// A placeholder record created by inviting a nonexistent email.
    ///
    /// Carries a fresh invitation token; the invitation email embeds it in
    /// the activation link.
    pub fn invited(
        email: impl Into<String>,
        fullname: impl Into<String>,
        title: Option<String>,
        pending_startup_id: StartupId,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            fullname: fullname.into(),
            title,
            startup_id: None,
            pending_startup_id: Some(pending_startup_id),
            invitation_token: Some(generate_token()),
            startup_link_verifier_id: None,
            created_at: Utc::now(),
        }
    }

    /// Relationship of this user to the given startup.
    pub fn cofounder_status(&self, startup_id: StartupId) -> CofounderStatus {
        if self.pending_startup_id == Some(startup_id) {
            CofounderStatus::Pending
        } else if self.startup_id == Some(startup_id) {
            CofounderStatus::Accepted
        } else {
            CofounderStatus::Rejected
        }
    }

    /// True iff this user is an active member of the given startup.
    ///
    /// Every mutating roster operation checks this first and fails with
    /// `AuthorizedUserStartupMismatch` otherwise.
    pub fn is_authorized_for(&self, startup_id: StartupId) -> bool {
        self.startup_id == Some(startup_id)
    }
}

/// Opaque one-time token (invitations, link verifiers).
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cofounder_status_is_relative() {
        let startup_a = StartupId::new();
        let startup_b = StartupId::new();

        let mut user = User::new("boo@example.com", "Boo");
        user.pending_startup_id = Some(startup_a);

        assert_eq!(user.cofounder_status(startup_a), CofounderStatus::Pending);
        assert_eq!(user.cofounder_status(startup_b), CofounderStatus::Rejected);
    }

    #[test]
    fn test_member_status_and_authorization() {
        let startup_a = StartupId::new();
        let startup_b = StartupId::new();

        let mut user = User::new("sully@example.com", "James P Sullivan");
        user.startup_id = Some(startup_a);

        assert_eq!(user.cofounder_status(startup_a), CofounderStatus::Accepted);
        assert!(user.is_authorized_for(startup_a));
        assert!(!user.is_authorized_for(startup_b));
    }

    #[test]
    fn test_invited_placeholder_carries_token() {
        let startup = StartupId::new();
        let user = User::invited("mike@example.com", "Mike Wazowski", None, startup);

        assert_eq!(user.pending_startup_id, Some(startup));
        assert!(user.startup_id.is_none());
        assert!(user.invitation_token.is_some());
    }
}
