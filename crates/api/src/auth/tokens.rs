//! JWT token service.
//!
//! Two independent token namespaces exist: user tokens (buyers and sellers)
//! and admin tokens. The namespaces are separated by the `aud` claim and
//! verified through two distinct paths, so a structurally valid token of one
//! kind never passes verification for the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use souk_core::{AdminId, Role, UserId};
use thiserror::Error;

/// Audience claim for user-namespace tokens.
const USER_AUDIENCE: &str = "souk:user";
/// Audience claim for admin-namespace tokens.
const ADMIN_AUDIENCE: &str = "souk:admin";

/// Fixed token lifetime.
const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Token service errors.
///
/// Verification failures are deliberately collapsed into a single variant:
/// callers surface "unauthorized" uniformly, never which check failed.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is malformed, tampered with, expired, or from the wrong
    /// namespace.
    #[error("invalid or expired token")]
    Invalid,

    /// Signing a new token failed.
    #[error("token generation failed: {0}")]
    Generation(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by a user-namespace token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject user id.
    pub sub: UserId,
    /// Role at issue time. Guards re-check entitlement per resource; the
    /// role claim only gates which route families are reachable.
    pub role: Role,
    /// Namespace discriminator.
    pub aud: String,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
}

/// Claims carried by an admin-namespace token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject admin id.
    pub sub: AdminId,
    /// Namespace discriminator.
    pub aud: String,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
}

/// Issues and verifies signed, time-limited bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service signing with the given secret (HS256).
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        }
    }

    /// Issue a user-namespace token for the given subject and role.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Generation`] if signing fails.
    pub fn issue_user(&self, user_id: UserId, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user_id,
            role,
            aud: USER_AUDIENCE.to_string(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
            iat: now.timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Issue an admin-namespace token for the given subject.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Generation`] if signing fails.
    pub fn issue_admin(&self, admin_id: AdminId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: admin_id,
            aud: ADMIN_AUDIENCE.to_string(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
            iat: now.timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify a token against the user namespace.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any failure: bad signature,
    /// expiry, malformed claims, or an admin-namespace token.
    pub fn verify_user(&self, token: &str) -> Result<UserClaims, TokenError> {
        let data = decode::<UserClaims>(token, &self.decoding_key, &validation(USER_AUDIENCE))
            .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }

    /// Verify a token against the admin namespace.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any failure: bad signature,
    /// expiry, malformed claims, or a user-namespace token.
    pub fn verify_admin(&self, token: &str) -> Result<AdminClaims, TokenError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &validation(ADMIN_AUDIENCE))
            .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }
}

fn validation(audience: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    validation
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from(
            "0f3a9d4e8b1c6275a0e9d8c7b6a5f4e3d2c1b0a998877665",
        ))
    }

    #[test]
    fn test_user_token_roundtrip() {
        let svc = service();
        let token = svc.issue_user(UserId::new(7), Role::Seller).unwrap();
        let claims = svc.verify_user(&token).unwrap();
        assert_eq!(claims.sub, UserId::new(7));
        assert_eq!(claims.role, Role::Seller);
    }

    #[test]
    fn test_admin_token_roundtrip() {
        let svc = service();
        let token = svc.issue_admin(AdminId::new(1)).unwrap();
        let claims = svc.verify_admin(&token).unwrap();
        assert_eq!(claims.sub, AdminId::new(1));
    }

    #[test]
    fn test_namespaces_are_not_interchangeable() {
        // A valid signature is not enough: the wrong namespace must fail.
        let svc = service();
        let user_token = svc.issue_user(UserId::new(7), Role::Buyer).unwrap();
        let admin_token = svc.issue_admin(AdminId::new(1)).unwrap();

        assert!(matches!(svc.verify_admin(&user_token), Err(TokenError::Invalid)));
        assert!(matches!(svc.verify_user(&admin_token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue_user(UserId::new(7), Role::Buyer).unwrap();
        let other = TokenService::new(&SecretString::from(
            "a-completely-different-signing-secret-value-1234",
        ));
        assert!(matches!(other.verify_user(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service();
        let now = Utc::now();
        let claims = UserClaims {
            sub: UserId::new(7),
            role: Role::Buyer,
            aud: USER_AUDIENCE.to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &svc.encoding_key).unwrap();
        assert!(matches!(svc.verify_user(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            service().verify_user("not-a-jwt"),
            Err(TokenError::Invalid)
        ));
    }
}
