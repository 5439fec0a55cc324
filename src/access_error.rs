use thiserror::Error;

use crate::entities::Role;
use crate::token::InvalidSession;
use crate::ShareableError;

/// Failures raised by context construction and authorization guards.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    #[error("Your session expired. Sign in again.")]
    ExpiredOrInvalidSession,
    #[error("Not authenticated as user.")]
    NotAuthenticated,
    #[error("Not authorized as {0}.")]
    NotAuthorizedForRole(Role),
    #[error("Not authenticated as owner.")]
    NotMessageOwner,
    #[error("Backend unavailable.")]
    BackendUnavailable(#[source] ShareableError),
}

impl AccessError {
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::ExpiredOrInvalidSession => "EXPIRED_OR_INVALID_SESSION",
            AccessError::NotAuthenticated => "NOT_AUTHENTICATED",
            AccessError::NotAuthorizedForRole(_) => "NOT_AUTHORIZED_FOR_ROLE",
            AccessError::NotMessageOwner => "NOT_MESSAGE_OWNER",
            AccessError::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
        }
    }
}

impl From<InvalidSession> for AccessError {
    fn from(_: InvalidSession) -> Self {
        AccessError::ExpiredOrInvalidSession
    }
}

impl From<ShareableError> for AccessError {
    fn from(e: ShareableError) -> Self {
        AccessError::BackendUnavailable(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        assert_eq!(
            AccessError::NotAuthorizedForRole(Role::Admin).to_string(),
            "Not authorized as admin."
        );
        assert_eq!(
            AccessError::from(InvalidSession).code(),
            "EXPIRED_OR_INVALID_SESSION"
        );
        let backend = AccessError::from(ShareableError::from(anyhow::anyhow!("db down")));
        assert_eq!(backend.code(), "BACKEND_UNAVAILABLE");
        assert_eq!(backend.to_string(), "Backend unavailable.");
    }
}
