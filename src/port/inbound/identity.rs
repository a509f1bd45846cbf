//! Identity port: who is calling, and may they administer the race.

use crate::domain::UserId;
use crate::error::AuthError;

/// A resolved caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user: UserId,
    pub is_admin: bool,
}

impl Caller {
    /// Fail with [`AuthError::Forbidden`] unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Resolves an inbound credential to a caller.
///
/// Failure yields [`AuthError::Unauthenticated`].
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, credential: &str) -> Result<Caller, AuthError>;
}
