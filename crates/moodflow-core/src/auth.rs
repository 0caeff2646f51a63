//! Password hashing and bearer tokens.
//!
//! Passwords are stored as Argon2id PHC strings. Tokens are a base64url JSON
//! claims blob followed by a keyed BLAKE3 MAC over that blob:
//!
//! ```text
//! <base64url(claims)>.<base64url(mac)>
//! ```

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MoodError, Result};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

const TOKEN_KEY_CONTEXT: &str = "moodflow 2024-01-01 bearer token signing key";

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(MoodError::validation("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(MoodError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| MoodError::Crypto(format!("Failed to generate salt: {}", e)))?;
    let salt = SaltString::encode_b64(&salt_bytes)?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns `MoodError::Crypto` if the stored hash is not a valid PHC string.
/// A wrong password is `Ok(false)`, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub username: String,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expires at, unix seconds
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a key derived from a server secret.
#[derive(Clone)]
pub struct TokenIssuer {
    key: [u8; 32],
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: blake3::derive_key(TOKEN_KEY_CONTEXT, secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        self.issue_at(user_id, username, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, username: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let mac = blake3::keyed_hash(&self.key, payload.as_bytes());
        Ok(format!(
            "{}.{}",
            payload,
            URL_SAFE_NO_PAD.encode(mac.as_bytes())
        ))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// # Errors
    ///
    /// Returns `MoodError::Unauthorized` for a malformed token, a bad
    /// signature, or an expired token.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let invalid = || MoodError::Unauthorized("Invalid token".to_string());

        let (payload, signature) = token.trim().split_once('.').ok_or_else(invalid)?;
        let signature: [u8; 32] = URL_SAFE_NO_PAD
            .decode(signature)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(invalid)?;

        // blake3::Hash equality is constant time
        let expected = blake3::keyed_hash(&self.key, payload.as_bytes());
        if expected != blake3::Hash::from(signature) {
            return Err(invalid());
        }

        let raw = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
        let claims: Claims = serde_json::from_slice(&raw).map_err(|_| invalid())?;
        if claims.exp <= now.timestamp() {
            return Err(MoodError::Unauthorized("Token expired".to_string()));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert!(validate_password("").is_err());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hash_uses_random_salt() {
        assert_ne!(
            hash_password("secret1").unwrap(),
            hash_password("secret1").unwrap()
        );
    }

    #[test]
    fn test_verify_against_garbage_hash_is_error() {
        assert!(matches!(
            verify_password("pw", "not-a-phc-string"),
            Err(MoodError::Crypto(_))
        ));
    }

    #[test]
    fn test_token_round_trip() {
        let issuer = TokenIssuer::new("secret", Duration::seconds(DEFAULT_TOKEN_TTL_SECS));
        let id = Uuid::new_v4();
        let token = issuer.issue(id, "demo_user").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.username, "demo_user");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let a = TokenIssuer::new("secret-a", Duration::hours(1));
        let b = TokenIssuer::new("secret-b", Duration::hours(1));
        let token = a.issue(Uuid::new_v4(), "x").unwrap();
        assert!(matches!(b.verify(&token), Err(MoodError::Unauthorized(_))));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = TokenIssuer::new("secret", Duration::hours(1));
        let token = issuer.issue(Uuid::new_v4(), "alice").unwrap();
        let (_, signature) = token.split_once('.').unwrap();
        let forged_claims = Claims {
            sub: Uuid::new_v4(),
            username: "mallory".to_string(),
            iat: 0,
            exp: i64::MAX,
        };
        let forged = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap()),
            signature
        );
        assert!(issuer.verify(&forged).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new("secret", Duration::hours(24));
        let issued = Utc::now() - Duration::hours(25);
        let token = issuer.issue_at(Uuid::new_v4(), "alice", issued).unwrap();
        let err = issuer.verify(&token).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Token expired");
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let issuer = TokenIssuer::new("secret", Duration::hours(1));
        for token in ["", "abc", "abc.def", "..", "a.b.c"] {
            assert!(issuer.verify(token).is_err(), "accepted {:?}", token);
        }
    }
}
