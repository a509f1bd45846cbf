//! Token-table identity resolver.

use std::collections::HashMap;

use crate::domain::UserId;
use crate::error::AuthError;
use crate::port::inbound::{Caller, IdentityResolver};

/// Resolves bearer tokens from a fixed table loaded at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentity {
    tokens: HashMap<String, Caller>,
}

impl StaticIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` for `user`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user: impl Into<UserId>, is_admin: bool) -> Self {
        self.tokens.insert(
            token.into(),
            Caller {
                user: user.into(),
                is_admin,
            },
        );
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityResolver for StaticIdentity {
    fn resolve(&self, credential: &str) -> Result<Caller, AuthError> {
        let token = credential.strip_prefix("Bearer ").unwrap_or(credential).trim();
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> StaticIdentity {
        StaticIdentity::new()
            .with_token("root", "admin", true)
            .with_token("t-ana", "ana", false)
    }

    #[test]
    fn resolves_known_tokens() {
        let caller = identity().resolve("t-ana").unwrap();
        assert_eq!(caller.user.as_str(), "ana");
        assert!(!caller.is_admin);
    }

    #[test]
    fn accepts_bearer_prefix() {
        assert!(identity().resolve("Bearer root").unwrap().is_admin);
    }

    #[test]
    fn unknown_token_is_unauthenticated() {
        assert_eq!(identity().resolve("nope"), Err(AuthError::Unauthenticated));
        assert_eq!(identity().resolve(""), Err(AuthError::Unauthenticated));
    }
}
