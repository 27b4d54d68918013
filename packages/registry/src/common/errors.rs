use thiserror::Error;

/// Error taxonomy for the venture registry membership core.
///
/// Every variant maps to a stable wire code via [`RegistryError::code`];
/// callers (HTTP controllers and the like) render them as structured
/// `(code, message)` pairs. Unexpected storage failures enter through the
/// `Storage` arm and carry no domain code semantics.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Authentication token missing or invalid")]
    AuthTokenInvalid,

    #[error("Authorized user does not belong to the requested startup")]
    AuthorizedUserStartupMismatch,

    #[error("User already has a startup")]
    UserAlreadyHasStartup,

    #[error("User is already a member of a startup")]
    UserAlreadyMemberOfStartup,

    #[error("User already has a pending startup invite")]
    UserHasPendingStartupInvite,

    #[error("No founder found for the given email")]
    FounderMissing,

    #[error("User is not a pending founder")]
    UserIsNotPendingFounder,

    #[error("User's pending invite belongs to a different startup")]
    UserPendingStartupMismatch,

    #[error("Startup approval status does not allow this transition")]
    StartupInvalidApprovalState,

    #[error("Startup is already registered")]
    StartupAlreadyRegistered,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl RegistryError {
    /// Stable wire code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthTokenInvalid => "AuthTokenInvalid",
            Self::AuthorizedUserStartupMismatch => "AuthorizedUserStartupMismatch",
            Self::UserAlreadyHasStartup => "UserAlreadyHasStartup",
            Self::UserAlreadyMemberOfStartup => "UserAlreadyMemberOfStartup",
            Self::UserHasPendingStartupInvite => "UserHasPendingStartupInvite",
            Self::FounderMissing => "FounderMissing",
            Self::UserIsNotPendingFounder => "UserIsNotPendingFounder",
            Self::UserPendingStartupMismatch => "UserPendingStartupMismatch",
            Self::StartupInvalidApprovalState => "StartupInvalidApprovalState",
            Self::StartupAlreadyRegistered => "StartupAlreadyRegistered",
            Self::Storage(_) => "InternalError",
        }
    }

    /// True for errors of the not-found class (rendered as 404 upstream).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FounderMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            RegistryError::AuthorizedUserStartupMismatch.code(),
            "AuthorizedUserStartupMismatch"
        );
        assert_eq!(RegistryError::FounderMissing.code(), "FounderMissing");
        assert_eq!(
            RegistryError::Storage(anyhow::anyhow!("boom")).code(),
            "InternalError"
        );
    }

    #[test]
    fn test_not_found_class() {
        assert!(RegistryError::FounderMissing.is_not_found());
        assert!(!RegistryError::UserIsNotPendingFounder.is_not_found());
    }
}
