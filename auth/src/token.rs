use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::role::Role;

/// Identity and role payload embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user record identifier)
    pub sub: String,

    /// Role held by the subject when the token was issued
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Issues signed, time-bounded access tokens.
///
/// Signs `{sub, role, iat, exp}` with HS256 over a server-held secret.
/// The secret should be at least 32 bytes and come from configuration,
/// never from source.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with a signing secret and a fixed token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a token for the given subject and role.
    ///
    /// `iat` is the current time and `exp` is `iat` plus the configured TTL.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Validates access tokens and extracts their claims.
///
/// A token is valid only if its signature verifies against the secret and
/// the current time is before `exp`. Expiry is checked with zero leeway.
/// There is no revocation list; an issued token stays valid until expiry.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with the given secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Current time is at or past the `exp` claim
    /// * `Invalid` - Signature mismatch, malformed token, or missing claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1));
        let verifier = TokenVerifier::new(SECRET);

        let token = issuer.issue("user123", Role::User).expect("issue failed");
        let claims = verifier.verify(&token).expect("verify failed");

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_role_survives_round_trip() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1));
        let verifier = TokenVerifier::new(SECRET);

        let token = issuer.issue("admin-1", Role::Admin).unwrap();
        assert_eq!(verifier.verify(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1));
        let verifier = TokenVerifier::new(b"another_secret_at_least_32_bytes!!");

        let token = issuer.issue("user123", Role::User).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new(SECRET, Duration::minutes(-5));
        let verifier = TokenVerifier::new(SECRET);

        let token = issuer.issue("user123", Role::User).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = TokenVerifier::new(SECRET);

        assert!(matches!(
            verifier.verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1));
        let verifier = TokenVerifier::new(SECRET);

        let token = issuer.issue("user123", Role::User).unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);

        assert!(matches!(
            verifier.verify(&tampered),
            Err(TokenError::Invalid(_))
        ));
    }
}
