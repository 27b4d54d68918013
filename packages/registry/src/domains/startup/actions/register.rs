//! Registration action - reconcile the founder roster into partnerships
//!
//! Converts an informal startup into a legal entity: persists the
//! registration type and legal fields in one atomic update, then creates
//! one Partnership per partner entry, resolving each partner against
//! existing users by email and creating full user records (no invitation
//! semantics) for the rest.

use std::collections::HashSet;

use anyhow::anyhow;
use tracing::info;

use crate::common::{PartnershipId, RegistryError};
use crate::domains::founder::actions::ensure_authorized;
use crate::domains::founder::models::User;
use crate::domains::startup::models::{
    Partnership, RegistrationDetails, RegistrationType, Startup,
};
use crate::kernel::{BasePartnershipStore as _, BaseStartupStore as _, BaseUserStore as _, RegistryDeps};

/// One partner of record in a registration request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PartnerEntry {
    pub fullname: String,
    pub email: String,
    pub shares: i64,
    pub cash_contribution: i64,
    pub salary: i64,
    pub managing_director: bool,
    pub operate_bank_account: bool,
}

/// Register a startup as a legal entity.
///
/// Partnerships are created in partner-list order; the first partnership
/// always references the first entry. Partner entries are validated before
/// any mutation, so a malformed batch creates nothing.
pub async fn register(
    deps: &RegistryDeps,
    actor: &User,
    startup: &Startup,
    registration_type: RegistrationType,
    details: RegistrationDetails,
    partners: &[PartnerEntry],
) -> Result<(Startup, Vec<Partnership>), RegistryError> {
    ensure_authorized(actor, startup)?;

    if startup.is_registered() {
        return Err(RegistryError::StartupAlreadyRegistered);
    }

    let mut seen_emails = HashSet::new();
    for partner in partners {
        if partner.email.trim().is_empty() || partner.fullname.trim().is_empty() {
            return Err(RegistryError::Storage(anyhow!(
                "malformed partner entry: fullname and email are required"
            )));
        }
        // One partnership per identity per startup; a duplicated email
        // would only fail at the second insert, after mutations began.
        if !seen_emails.insert(partner.email.as_str()) {
            return Err(RegistryError::Storage(anyhow!(
                "malformed partner entry: duplicate email {}",
                partner.email
            )));
        }
    }

    // Atomic set-once guard closes the race between two registrations.
    let registered = deps
        .startups
        .apply_registration(startup.id, registration_type, &details)
        .await?
        .ok_or(RegistryError::StartupAlreadyRegistered)?;

    let mut partnerships = Vec::with_capacity(partners.len());
    for partner in partners {
        let user = match deps.users.find_by_email(&partner.email).await? {
            Some(user) => user,
            None => {
                // Partner of record, not a pending cofounder: no
                // invitation token, no pending pointer.
                let user = deps
                    .users
                    .insert(User::new(&partner.email, &partner.fullname))
                    .await?;
                info!("Created partner-of-record user {} ({})", user.id, user.email);
                user
            }
        };

        let partnership = deps
            .partnerships
            .insert(Partnership {
                id: PartnershipId::new(),
                user_id: user.id,
                startup_id: registered.id,
                shares: partner.shares,
                cash_contribution: partner.cash_contribution,
                salary: partner.salary,
                managing_director: partner.managing_director,
                operate_bank_account: partner.operate_bank_account,
                created_at: chrono::Utc::now(),
            })
            .await?;
        partnerships.push(partnership);
    }

    info!(
        "Registered startup {} with {} partnerships",
        registered.id,
        partnerships.len()
    );
    Ok((registered, partnerships))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::memory_deps;
    use crate::kernel::{BaseStartupStore, BaseUserStore};

    fn seed_founder(
        store: &crate::kernel::test_dependencies::MemoryStore,
        email: &str,
        startup: &Startup,
    ) -> User {
        let mut founder = User::new(email, "Founder");
        founder.startup_id = Some(startup.id);
        store.seed_user(founder)
    }

    fn details() -> RegistrationDetails {
        RegistrationDetails {
            address: "24 Main Street".to_string(),
            state: "Kerala".to_string(),
            district: "Ernakulam".to_string(),
            pitch: "monsters through doors".to_string(),
            total_shares: 30_000,
        }
    }

    fn partner(fullname: &str, email: &str, shares: i64) -> PartnerEntry {
        PartnerEntry {
            fullname: fullname.to_string(),
            email: email.to_string(),
            shares,
            cash_contribution: 50_000,
            salary: 20_000,
            managing_director: false,
            operate_bank_account: false,
        }
    }

    #[tokio::test]
    async fn test_register_updates_startup_and_creates_partnerships_in_order() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);
        let second = seed_founder(&store, "second@example.com", &startup);

        let mut first = partner("Founder", "founder@example.com", 7_000);
        first.managing_director = true;
        first.operate_bank_account = true;
        let partners = vec![first, partner("Second", "second@example.com", 3_000)];

        let (registered, partnerships) = register(
            &deps,
            &founder,
            &startup,
            RegistrationType::Partnership,
            details(),
            &partners,
        )
        .await
        .unwrap();

        assert_eq!(
            registered.registration_type,
            Some(RegistrationType::Partnership)
        );
        assert_eq!(registered.address.as_deref(), Some("24 Main Street"));
        assert_eq!(registered.total_shares, Some(30_000));

        assert_eq!(partnerships.len(), 2);
        assert_eq!(partnerships[0].user_id, founder.id);
        assert_eq!(partnerships[0].shares, 7_000);
        assert!(partnerships[0].managing_director);
        assert_eq!(partnerships[1].user_id, second.id);
        assert!(!partnerships[1].operate_bank_account);
    }

    #[tokio::test]
    async fn test_register_creates_users_for_new_partners() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        let partners = vec![
            partner("Founder", "founder@example.com", 5_000),
            partner("Just A Partner", "new.partner@example.com", 5_000),
        ];

        let (_, partnerships) = register(
            &deps,
            &founder,
            &startup,
            RegistrationType::Partnership,
            details(),
            &partners,
        )
        .await
        .unwrap();

        let created = deps
            .users
            .find_by_email("new.partner@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.fullname, "Just A Partner");
        assert!(created.invitation_token.is_none());
        assert!(created.pending_startup_id.is_none());
        assert_eq!(partnerships[1].user_id, created.id);
    }

    #[tokio::test]
    async fn test_reregistration_fails() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        let partners = vec![partner("Founder", "founder@example.com", 5_000)];
        let (registered, _) = register(
            &deps,
            &founder,
            &startup,
            RegistrationType::Partnership,
            details(),
            &partners,
        )
        .await
        .unwrap();

        let err = register(
            &deps,
            &founder,
            &registered,
            RegistrationType::Partnership,
            details(),
            &partners,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), "StartupAlreadyRegistered");
        assert_eq!(store.partnership_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_partner_email_creates_nothing() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        let partners = vec![
            partner("Dup One", "dup@example.com", 5_000),
            partner("Dup Two", "dup@example.com", 5_000),
        ];

        let result = register(
            &deps,
            &founder,
            &startup,
            RegistrationType::Partnership,
            details(),
            &partners,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(store.partnership_count(), 0);
        let untouched = deps.startups.find_by_id(startup.id).await.unwrap().unwrap();
        assert!(!untouched.is_registered());
        assert!(deps
            .users
            .find_by_email("dup@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_malformed_partner_creates_nothing() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        let partners = vec![
            partner("Founder", "founder@example.com", 5_000),
            partner("No Email", "", 5_000),
        ];

        let result = register(
            &deps,
            &founder,
            &startup,
            RegistrationType::Partnership,
            details(),
            &partners,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(store.partnership_count(), 0);
        let untouched = deps.startups.find_by_id(startup.id).await.unwrap().unwrap();
        assert!(!untouched.is_registered());
    }
}
