//! Opaque bearer-token issuance and verification.

use std::collections::HashSet;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::config::AuthConfig;

/// Issues opaque tokens for the configured credential pair and verifies
/// them on later requests. Tokens live for the lifetime of the process.
pub struct TokenService {
    auth: AuthConfig,
    tokens: RwLock<HashSet<String>>,
}

impl TokenService {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            tokens: RwLock::new(HashSet::new()),
        }
    }

    /// Whether requests must carry a token at all.
    pub fn enabled(&self) -> bool {
        self.auth.enabled
    }

    /// Exchange credentials for a fresh token. `None` on a bad pair.
    pub fn issue(&self, username: &str, password: &str) -> Option<String> {
        if username != self.auth.username || password != self.auth.password {
            return None;
        }
        let token = Uuid::new_v4().to_string();
        self.tokens.write().insert(token.clone());
        Some(token)
    }

    /// Check a previously issued token.
    pub fn verify(&self, token: &str) -> bool {
        self.tokens.read().contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(AuthConfig {
            enabled: true,
            username: "admin".into(),
            password: "secret".into(),
        })
    }

    #[test]
    fn issue_with_valid_credentials() {
        let service = service();
        let token = service.issue("admin", "secret").unwrap();
        assert!(service.verify(&token));
    }

    #[test]
    fn issue_with_bad_credentials_fails() {
        let service = service();
        assert!(service.issue("admin", "wrong").is_none());
        assert!(service.issue("nobody", "secret").is_none());
    }

    #[test]
    fn unknown_token_is_rejected() {
        let service = service();
        assert!(!service.verify("not-a-token"));
    }

    #[test]
    fn each_issue_yields_a_distinct_token() {
        let service = service();
        let a = service.issue("admin", "secret").unwrap();
        let b = service.issue("admin", "secret").unwrap();
        assert_ne!(a, b);
        assert!(service.verify(&a));
        assert!(service.verify(&b));
    }
}
