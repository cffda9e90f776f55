//! The credential store facade.

use std::sync::Arc;

use jiff::Timestamp;

use super::claims::TokenClaims;
use super::storage::{FileStorage, MemoryStorage, StorageBackend, StoredCredential};
use crate::TRACING_TARGET_AUTH;
use crate::types::User;

/// Wraps a persisted, expiring credential behind a pluggable backend.
///
/// The store is injected wherever a credential is needed (route guard,
/// request client) rather than living in a module-level global, so tests
/// can substitute a [`MemoryStorage`] backend.
///
/// # Clone semantics
///
/// Cloning is cheap and clones share the same backend.
#[derive(Debug, Clone)]
pub struct TokenStore {
    backend: Arc<dyn StorageBackend>,
}

impl TokenStore {
    /// Creates a store over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Creates a store that keeps the credential in process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Creates a store persisted as a JSON file at the given path.
    pub fn on_disk(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(path)))
    }

    /// Persists a raw token, deriving the record expiry from the token's
    /// own `exp` claim.
    ///
    /// A token that fails to decode is logged and **not** persisted; this
    /// never panics or returns an error past this boundary.
    pub fn set(&self, raw_token: &str) {
        match TokenClaims::decode(raw_token) {
            Ok(claims) => {
                let credential = StoredCredential {
                    token: raw_token.to_owned(),
                    expires_at: claims.expires_at(),
                };
                self.backend.write(&credential);
                tracing::debug!(
                    target: TRACING_TARGET_AUTH,
                    subject = %claims.sub,
                    expires_at = %credential.expires_at,
                    "Stored credential token"
                );
            }
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTH,
                    error = %err,
                    "Refusing to store undecodable token"
                );
            }
        }
    }

    /// Returns the persisted token, or `None` if absent.
    ///
    /// A record whose stored expiry has passed behaves like an expired
    /// cookie: it is removed and reported as absent.
    pub fn get(&self) -> Option<String> {
        let credential = self.backend.read()?;
        if credential.expires_at <= Timestamp::now() {
            tracing::debug!(
                target: TRACING_TARGET_AUTH,
                expired_at = %credential.expires_at,
                "Dropping expired credential record"
            );
            self.backend.remove();
            return None;
        }
        Some(credential.token)
    }

    /// Removes the credential unconditionally.
    pub fn clear(&self) {
        self.backend.remove();
    }

    /// Returns `true` iff a token is present, decodable, and its expiry
    /// claim is strictly in the future. Malformed tokens count as invalid,
    /// never as an error.
    pub fn is_valid(&self) -> bool {
        match self.get() {
            Some(token) => TokenClaims::decode(&token)
                .map(|claims| !claims.is_expired())
                .unwrap_or(false),
            None => false,
        }
    }

    /// The user profile embedded in the current token, if one is stored
    /// and decodable.
    pub fn current_user(&self) -> Option<User> {
        let token = self.get()?;
        TokenClaims::decode(&token).ok().map(|claims| claims.to_user())
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;

    fn mint(exp: i64) -> String {
        let claims = TokenClaims {
            sub: "user-1".into(),
            email: "a@b.test".into(),
            iat: 1_700_000_000,
            exp,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-only-secret"),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        Timestamp::now().as_second() + 3_600
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let store = TokenStore::in_memory();
        let token = mint(future_exp());
        store.set(&token);
        assert_eq!(store.get(), Some(token));
        assert!(store.is_valid());
    }

    #[test]
    fn test_set_refuses_malformed_token() {
        let store = TokenStore::in_memory();
        store.set("garbage");
        assert_eq!(store.get(), None);
        assert!(!store.is_valid());
    }

    #[test]
    fn test_expired_record_reads_as_absent() {
        let store = TokenStore::in_memory();
        store.set(&mint(Timestamp::now().as_second() - 60));
        assert_eq!(store.get(), None);
        assert!(!store.is_valid());
    }

    #[test]
    fn test_clear_removes_credential() {
        let store = TokenStore::in_memory();
        store.set(&mint(future_exp()));
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_current_user_comes_from_claims() {
        let store = TokenStore::in_memory();
        store.set(&mint(future_exp()));
        let user = store.current_user().unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "a@b.test");
    }

    #[test]
    fn test_disk_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let token = mint(future_exp());

        let store = TokenStore::on_disk(path.clone());
        store.set(&token);

        // A fresh store over the same path sees the same credential.
        let reopened = TokenStore::on_disk(path);
        assert_eq!(reopened.get(), Some(token));
        assert!(reopened.is_valid());
    }

    #[test]
    fn test_clones_share_backend() {
        let store = TokenStore::in_memory();
        let clone = store.clone();
        store.set(&mint(future_exp()));
        assert!(clone.is_valid());
        clone.clear();
        assert!(!store.is_valid());
    }
}
