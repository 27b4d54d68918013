// Test dependencies - in-memory implementations for testing
//
// MemoryStore implements all three store traits behind one mutex, so the
// conditional claims stay atomic exactly like their SQL counterparts.
// MockNotifier records every dispatched notice for assertions.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::common::{StartupId, UserId};
use crate::domains::founder::models::User;
use crate::domains::startup::models::{Partnership, RegistrationDetails, RegistrationType, Startup};

use super::traits::{BaseNotifier, BasePartnershipStore, BaseStartupStore, BaseUserStore};

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    startups: HashMap<StartupId, Startup>,
    partnerships: Vec<Partnership>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing the claim guards (test setup only).
    pub fn seed_user(&self, user: User) -> User {
        let mut state = self.state.lock().unwrap();
        state.users.insert(user.id, user.clone());
        user
    }

    /// Seed a startup directly (test setup only).
    pub fn seed_startup(&self, startup: Startup) -> Startup {
        let mut state = self.state.lock().unwrap();
        state.startups.insert(startup.id, startup.clone());
        startup
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn startup_count(&self) -> usize {
        self.state.lock().unwrap().startups.len()
    }

    pub fn partnership_count(&self) -> usize {
        self.state.lock().unwrap().partnerships.len()
    }
}

#[async_trait]
impl BaseUserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|u| u.email == user.email) {
            bail!("duplicate email: {}", user.email);
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn claim_pending_startup(
        &self,
        id: UserId,
        startup_id: StartupId,
    ) -> Result<Option<User>> {
        let mut state = self.state.lock().unwrap();
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if user.pending_startup_id.is_some() || user.startup_id.is_some() {
            return Ok(None);
        }
        user.pending_startup_id = Some(startup_id);
        Ok(Some(user.clone()))
    }

    async fn claim_startup(
        &self,
        id: UserId,
        startup_id: StartupId,
        title: Option<&str>,
    ) -> Result<Option<User>> {
        let mut state = self.state.lock().unwrap();
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if user.startup_id.is_some() {
            return Ok(None);
        }
        if user
            .pending_startup_id
            .is_some_and(|pending| pending != startup_id)
        {
            return Ok(None);
        }
        user.startup_id = Some(startup_id);
        user.pending_startup_id = None;
        user.startup_link_verifier_id = None;
        if let Some(title) = title {
            user.title = Some(title.to_string());
        }
        Ok(Some(user.clone()))
    }

    async fn clear_pending_startup(&self, id: UserId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.get_mut(&id) {
            user.pending_startup_id = None;
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        self.state.lock().unwrap().users.remove(&id);
        Ok(())
    }

    async fn list_members(&self, startup_id: StartupId) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut members: Vec<User> = state
            .users
            .values()
            .filter(|u| u.startup_id == Some(startup_id))
            .cloned()
            .collect();
        members.sort_by_key(|u| u.created_at);
        Ok(members)
    }

    async fn list_pending(&self, startup_id: StartupId) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut pending: Vec<User> = state
            .users
            .values()
            .filter(|u| u.pending_startup_id == Some(startup_id))
            .cloned()
            .collect();
        pending.sort_by_key(|u| u.created_at);
        Ok(pending)
    }
}

#[async_trait]
impl BaseStartupStore for MemoryStore {
    async fn find_by_id(&self, id: StartupId) -> Result<Option<Startup>> {
        Ok(self.state.lock().unwrap().startups.get(&id).cloned())
    }

    async fn insert(&self, startup: Startup) -> Result<Startup> {
        let mut state = self.state.lock().unwrap();
        state.startups.insert(startup.id, startup.clone());
        Ok(startup)
    }

    async fn set_approval_pending(&self, id: StartupId) -> Result<Option<Startup>> {
        use crate::domains::startup::models::ApprovalStatus;

        let mut state = self.state.lock().unwrap();
        let Some(startup) = state.startups.get_mut(&id) else {
            return Ok(None);
        };
        if startup.approval_status.is_some() {
            return Ok(None);
        }
        startup.approval_status = Some(ApprovalStatus::Pending);
        Ok(Some(startup.clone()))
    }

    async fn apply_registration(
        &self,
        id: StartupId,
        registration_type: RegistrationType,
        details: &RegistrationDetails,
    ) -> Result<Option<Startup>> {
        let mut state = self.state.lock().unwrap();
        let Some(startup) = state.startups.get_mut(&id) else {
            return Ok(None);
        };
        if startup.registration_type.is_some() {
            return Ok(None);
        }
        startup.registration_type = Some(registration_type);
        startup.address = Some(details.address.clone());
        startup.state = Some(details.state.clone());
        startup.district = Some(details.district.clone());
        startup.pitch = Some(details.pitch.clone());
        startup.total_shares = Some(details.total_shares);
        Ok(Some(startup.clone()))
    }
}

#[async_trait]
impl BasePartnershipStore for MemoryStore {
    async fn insert(&self, partnership: Partnership) -> Result<Partnership> {
        let mut state = self.state.lock().unwrap();
        if state
            .partnerships
            .iter()
            .any(|p| p.user_id == partnership.user_id && p.startup_id == partnership.startup_id)
        {
            bail!(
                "duplicate partnership for user {} in startup {}",
                partnership.user_id,
                partnership.startup_id
            );
        }
        state.partnerships.push(partnership.clone());
        Ok(partnership)
    }

    async fn list_for_startup(&self, startup_id: StartupId) -> Result<Vec<Partnership>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .partnerships
            .iter()
            .filter(|p| p.startup_id == startup_id)
            .cloned()
            .collect())
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .partnerships
            .iter()
            .filter(|p| p.user_id == user_id)
            .count() as i64)
    }
}

// =============================================================================
// Mock Notifier
// =============================================================================

/// One recorded dispatch from MockNotifier.
#[derive(Debug, Clone, PartialEq)]
pub enum SentNotice {
    Invitation {
        email: String,
        token: String,
        startup_id: StartupId,
    },
    InviteNotice {
        email: String,
        startup_id: StartupId,
    },
    Joined {
        recipient_email: String,
        new_member_email: String,
        startup_id: StartupId,
    },
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<SentNotice>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every dispatch fail (callers must treat delivery as
    /// best-effort, so actions still succeed).
    pub fn with_failure(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    /// All notices dispatched so far.
    pub fn sent(&self) -> Vec<SentNotice> {
        self.sent.lock().unwrap().clone()
    }

    /// Whether an invitation email went to the given address.
    pub fn invited(&self, email: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|n| matches!(n, SentNotice::Invitation { email: e, .. } if e == email))
    }

    fn record(&self, notice: SentNotice) -> Result<()> {
        if *self.fail.lock().unwrap() {
            bail!("notifier configured to fail");
        }
        self.sent.lock().unwrap().push(notice);
        Ok(())
    }
}

#[async_trait]
impl BaseNotifier for MockNotifier {
    async fn send_cofounder_invitation(
        &self,
        invitee: &User,
        startup: &Startup,
        _inviter: &User,
        token: &str,
    ) -> Result<()> {
        self.record(SentNotice::Invitation {
            email: invitee.email.clone(),
            token: token.to_string(),
            startup_id: startup.id,
        })
    }

    async fn send_cofounder_invite_notice(
        &self,
        invitee: &User,
        startup: &Startup,
        _inviter: &User,
    ) -> Result<()> {
        self.record(SentNotice::InviteNotice {
            email: invitee.email.clone(),
            startup_id: startup.id,
        })
    }

    async fn send_cofounder_joined(
        &self,
        recipient: &User,
        new_member: &User,
        startup: &Startup,
    ) -> Result<()> {
        self.record(SentNotice::Joined {
            recipient_email: recipient.email.clone(),
            new_member_email: new_member.email.clone(),
            startup_id: startup.id,
        })
    }
}

/// RegistryDeps wired entirely to in-memory implementations.
pub fn memory_deps() -> (super::deps::RegistryDeps, MemoryStore, MockNotifier) {
    let store = MemoryStore::new();
    let notifier = MockNotifier::new();
    let deps = super::deps::RegistryDeps::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
    );
    (deps, store, notifier)
}
