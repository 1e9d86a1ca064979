//! Credential utilities library
//!
//! Provides the credential lifecycle building blocks used by the user service:
//! - Password hashing (bcrypt)
//! - Legacy plaintext credential detection
//! - JWT token issuance and validation
//! - Authentication coordination over a [`Principal`]
//!
//! The library has no knowledge of storage or HTTP; services implement
//! [`Principal`] for their own identity type.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(auth::password::is_hashed(&hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Principal, TokenService};
//! use chrono::Duration;
//!
//! struct Alice;
//!
//! impl Principal for Alice {
//!     fn id(&self) -> String { "1".to_string() }
//!     fn username(&self) -> &str { "alice" }
//!     fn credential_hash(&self) -> &str { "" }
//! }
//!
//! let service = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(24));
//! let token = service.issue(&Alice).unwrap();
//! assert_eq!(service.subject_of(&token).unwrap(), "alice");
//! assert!(service.is_valid(&token, &Alice));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod principal;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::Principal;
