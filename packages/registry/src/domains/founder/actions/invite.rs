//! Invite action - add a prospective cofounder by email

use tracing::{info, warn};

use crate::common::RegistryError;
use crate::domains::founder::models::User;
use crate::domains::startup::models::Startup;
use crate::kernel::{BaseNotifier as _, BaseUserStore as _, RegistryDeps};

use super::ensure_authorized;

/// Result of an invitation, tagged by which onboarding path ran.
#[derive(Debug, Clone)]
pub enum InviteOutcome {
    /// No account existed for the email; a placeholder identity was
    /// created with a fresh invitation token.
    Created(User),
    /// An existing unaffiliated account was attached as pending.
    Attached(User),
}

impl InviteOutcome {
    pub fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Attached(user) => user,
        }
    }

    pub fn into_user(self) -> User {
        match self {
            Self::Created(user) | Self::Attached(user) => user,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Invite a cofounder to the acting founder's startup.
///
/// Unknown emails get a placeholder identity plus an invitation email
/// carrying the activation token. Known, unaffiliated users get an atomic
/// pending-claim and a notification without a new token. Notification
/// delivery is best-effort and never fails the invite.
pub async fn invite(
    deps: &RegistryDeps,
    actor: &User,
    startup: &Startup,
    email: &str,
    fullname: Option<&str>,
    title: Option<&str>,
) -> Result<InviteOutcome, RegistryError> {
    ensure_authorized(actor, startup)?;

    info!("Inviting {} to startup {}", email, startup.id);

    let Some(existing) = deps.users.find_by_email(email).await? else {
        let user = User::invited(
            email,
            fullname.unwrap_or_default(),
            title.map(str::to_string),
            startup.id,
        );
        let token = user.invitation_token.clone().unwrap_or_default();
        let user = deps.users.insert(user).await?;

        if let Err(e) = deps
            .notifier
            .send_cofounder_invitation(&user, startup, actor, &token)
            .await
        {
            warn!("Failed to send invitation email to {}: {}", email, e);
        }

        info!("Created placeholder cofounder {} for {}", user.id, email);
        return Ok(InviteOutcome::Created(user));
    };

    if existing.startup_id.is_some() {
        return Err(RegistryError::UserAlreadyMemberOfStartup);
    }
    if existing.pending_startup_id.is_some() {
        return Err(RegistryError::UserHasPendingStartupInvite);
    }

    // Atomic claim: a concurrent invite that won the race surfaces here
    // as a failed guard, not as a second pending state.
    let user = deps
        .users
        .claim_pending_startup(existing.id, startup.id)
        .await?
        .ok_or(RegistryError::UserHasPendingStartupInvite)?;

    if let Err(e) = deps
        .notifier
        .send_cofounder_invite_notice(&user, startup, actor)
        .await
    {
        warn!("Failed to notify {} of cofounder invite: {}", email, e);
    }

    info!("Attached existing user {} as pending cofounder", user.id);
    Ok(InviteOutcome::Attached(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{memory_deps, SentNotice};

    fn seed_founder(
        store: &crate::kernel::test_dependencies::MemoryStore,
        email: &str,
        startup: &Startup,
    ) -> User {
        let mut founder = User::new(email, "Founder");
        founder.startup_id = Some(startup.id);
        store.seed_user(founder)
    }

    #[tokio::test]
    async fn test_invite_unknown_email_creates_placeholder_with_token() {
        let (deps, store, notifier) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        let outcome = invite(
            &deps,
            &founder,
            &startup,
            "sully@example.com",
            Some("James P Sullivan"),
            None,
        )
        .await
        .unwrap();

        assert!(outcome.was_created());
        let user = outcome.user();
        assert_eq!(user.pending_startup_id, Some(startup.id));
        assert!(user.invitation_token.is_some());

        // Invitation email carries the token
        assert!(notifier.invited("sully@example.com"));
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            SentNotice::Invitation { email, token, .. } => {
                assert_eq!(email, "sully@example.com");
                assert_eq!(token, user.invitation_token.as_ref().unwrap());
            }
            other => panic!("unexpected notice: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invite_existing_user_attaches_without_token() {
        let (deps, store, notifier) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);
        store.seed_user(User::new("boo@example.com", "Boo"));

        let outcome = invite(&deps, &founder, &startup, "boo@example.com", None, None)
            .await
            .unwrap();

        assert!(!outcome.was_created());
        assert_eq!(outcome.user().pending_startup_id, Some(startup.id));
        assert!(outcome.user().invitation_token.is_none());
        assert!(matches!(notifier.sent()[0], SentNotice::InviteNotice { .. }));
    }

    #[tokio::test]
    async fn test_invite_requires_authorization() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let other = store.seed_startup(Startup::new("startup 2"));
        let outsider = seed_founder(&store, "outsider@example.com", &other);

        let err = invite(&deps, &outsider, &startup, "x@example.com", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "AuthorizedUserStartupMismatch");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_invite_member_of_any_startup_fails() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let elsewhere = store.seed_startup(Startup::new("foobar 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);
        seed_founder(&store, "taken@example.com", &elsewhere);

        let err = invite(&deps, &founder, &startup, "taken@example.com", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "UserAlreadyMemberOfStartup");
    }

    #[tokio::test]
    async fn test_double_invite_fails_second_call() {
        let (deps, store, _) = memory_deps();
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        invite(&deps, &founder, &startup, "sully@example.com", None, None)
            .await
            .unwrap();
        let err = invite(&deps, &founder, &startup, "sully@example.com", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "UserHasPendingStartupInvite");
    }

    #[tokio::test]
    async fn test_notifier_failure_does_not_fail_invite() {
        let (deps, store, _) = memory_deps();
        let deps = RegistryDeps {
            notifier: std::sync::Arc::new(
                crate::kernel::test_dependencies::MockNotifier::new().with_failure(),
            ),
            ..deps
        };
        let startup = store.seed_startup(Startup::new("startup 1"));
        let founder = seed_founder(&store, "founder@example.com", &startup);

        let outcome = invite(&deps, &founder, &startup, "sully@example.com", None, None)
            .await
            .unwrap();

        assert!(outcome.was_created());
    }
}
