use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::StartupId;

/// Incubation approval state. Absent (`None`) until the startup applies.
///
/// The only transition this core performs is unset -> pending (incubate);
/// approved/rejected are set by the incubation review, outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Legal registration form. Absent until the startup registers; settable
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    Partnership,
}

/// Startup model - an organization that accumulates founders and may later
/// register as a legal entity.
///
/// Legal fields stay NULL until registration applies them in one atomic
/// update.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Startup {
    pub id: StartupId,
    pub name: String,
    pub approval_status: Option<ApprovalStatus>,
    pub registration_type: Option<RegistrationType>,

    // Legal fields, populated only at registration
    pub address: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub pitch: Option<String>,
    pub total_shares: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl Startup {
    /// A freshly founded startup: no members, no approval state, not
    /// registered.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StartupId::new(),
            name: name.into(),
            approval_status: None,
            registration_type: None,
            address: None,
            state: None,
            district: None,
            pitch: None,
            total_shares: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registration_type.is_some()
    }
}

/// Legal fields supplied with a registration request, applied to the
/// startup row together with the registration type in a single update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDetails {
    pub address: String,
    pub state: String,
    pub district: String,
    pub pitch: String,
    pub total_shares: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_startup_is_blank() {
        let startup = Startup::new("foobar 1");
        assert!(startup.approval_status.is_none());
        assert!(!startup.is_registered());
        assert!(startup.address.is_none());
    }
}
