//! JWT claims embedded in the backend-issued credential.

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::User;

/// Claims this client reads out of the credential token.
///
/// Decoding deliberately skips signature verification: the client never
/// holds the signing key, and the backend re-verifies every request. The
/// decoded expiry is therefore a UX hint, not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the opaque user id.
    pub sub: String,
    /// Email address of the subject.
    #[serde(default)]
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Decodes claims from a raw token without verifying its signature.
    ///
    /// Expiry is not validated here; callers compare [`Self::expires_at`]
    /// against the current time so an expired-but-well-formed token can
    /// still be distinguished from a malformed one.
    ///
    /// # Errors
    ///
    /// Returns an authentication error for any token that is not a
    /// well-formed JWT carrying `sub` and `exp` claims.
    pub fn decode(token: &str) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let token_data =
            jsonwebtoken::decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)
                .map_err(|e| {
                    Error::authentication()
                        .with_message("malformed credential token")
                        .with_source(e)
                })?;

        Ok(token_data.claims)
    }

    /// The token's expiry instant.
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_second(self.exp).unwrap_or(Timestamp::MAX)
    }

    /// The token's issuance instant.
    #[inline]
    #[must_use]
    pub fn issued_at(&self) -> Timestamp {
        Timestamp::from_second(self.iat).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at() <= Timestamp::now()
    }

    /// Builds the user profile embedded in the token.
    pub fn to_user(&self) -> User {
        User {
            id: self.sub.clone(),
            email: self.email.clone(),
            created_at: self.issued_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;

    fn mint(sub: &str, email: &str, exp: i64) -> String {
        let claims = TokenClaims {
            sub: sub.into(),
            email: email.into(),
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

    fn far_future() -> i64 {
        Timestamp::now().as_second() + 3_600
    }

    #[test]
    fn test_decode_ignores_signature_key() {
        // The client has no signing key; decoding must still succeed.
        let token = mint("user-1", "a@b.test", far_future());
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@b.test");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_decode_accepts_expired_token() {
        let token = mint("user-1", "a@b.test", 1_700_000_100);
        let claims = TokenClaims::decode(&token).unwrap();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = TokenClaims::decode("not-a-jwt").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Authentication);
    }

    #[test]
    fn test_to_user_uses_issued_at() {
        let token = mint("user-9", "x@y.test", far_future());
        let user = TokenClaims::decode(&token).unwrap().to_user();
        assert_eq!(user.id, "user-9");
        assert_eq!(user.created_at, Timestamp::from_second(1_700_000_000).unwrap());
    }
}
