//! Authentication primitives library
//!
//! Provides the credential-handling building blocks shared by the backend
//! service and the client session layer:
//! - Role enum carried by user records and token claims
//! - Password hashing (Argon2id)
//! - Signed, time-bounded access tokens (HS256)
//!
//! Tokens are stateless: once issued they remain valid until expiry, and
//! there is no server-side revocation list. Logout is local erasure only.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Role, TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::hours(1));
//! let verifier = TokenVerifier::new(secret);
//!
//! let token = issuer.issue("user123", Role::Admin).unwrap();
//! let claims = verifier.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleError;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenVerifier;
