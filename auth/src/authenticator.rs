use std::sync::OnceLock;

use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordHasher;
use crate::principal::Principal;

/// Plaintext behind the decoy hash checked for unknown logins.
const DECOY_PASSWORD: &str = "decoy-credential-never-issued";

/// Authentication coordinator combining password verification and token
/// handling.
///
/// Built once at startup and shared behind an `Arc`; it owns the token
/// signing key.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    decoy_hash: OnceLock<Option<String>>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used for new credentials and verification
    /// * `token_service` - Token issuer/verifier holding the signing key
    pub fn new(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
            decoy_hash: OnceLock::new(),
        }
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Check a plaintext password against the principal's stored credential.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored
    ///   credential is not a hash)
    pub fn verify_credentials<P: Principal + ?Sized>(
        &self,
        principal: &P,
        password: &str,
    ) -> Result<(), AuthenticationError> {
        if self
            .password_hasher
            .verify(password, principal.credential_hash())
        {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Verify credentials and issue a token in one step.
    ///
    /// CPU-bound; async callers should run it on a blocking pool.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate<P: Principal + ?Sized>(
        &self,
        principal: &P,
        password: &str,
    ) -> Result<String, AuthenticationError> {
        self.verify_credentials(principal, password)?;
        Ok(self.token_service.issue(principal)?)
    }

    /// Fail a login that has no principal behind it.
    ///
    /// Runs one bcrypt verification against a decoy hash at the configured
    /// cost, so the rejection takes as long as a wrong password. The decoy
    /// is hashed on first use. Always returns `InvalidCredentials`.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(hash) = decoy {
            // Outcome is irrelevant, only the work matters
            let _ = self.password_hasher.verify(password, hash);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, when the credential was just set.
    pub fn generate_token<P: Principal + ?Sized>(&self, principal: &P) -> Result<String, TokenError> {
        self.token_service.issue(principal)
    }

    /// Extract the subject of a verified token.
    pub fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.subject_of(token)
    }

    /// Check that a token belongs to `principal` and is unexpired.
    pub fn is_token_valid<P: Principal + ?Sized>(&self, token: &str, principal: &P) -> bool {
        self.token_service.is_valid(token, principal)
    }
}
