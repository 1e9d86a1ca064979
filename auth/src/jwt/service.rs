use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::principal::Principal;

/// Issues and checks signed, time-limited bearer tokens.
///
/// Holds the symmetric signing key for the lifetime of the process: build it
/// once at startup and share it. Uses HS256 (HMAC with SHA-256). Replacing the
/// secret invalidates every outstanding token.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Token lifetime used when none is configured.
    pub const DEFAULT_TTL_MINUTES: i64 = 24;

    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a principal, valid from now until now + TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue<P: Principal + ?Sized>(&self, principal: &P) -> Result<String, TokenError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn issue_at<P: Principal + ?Sized>(
        &self,
        principal: &P,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_user(principal.username(), principal.id(), issued_at, self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify the signature and structure of a token and return its claims.
    ///
    /// Expiry is not enforced here; see [`TokenService::is_valid`].
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch, malformed token or missing `sub`/`exp`
    pub fn claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Extract the subject (login) from a verified token.
    ///
    /// # Errors
    /// * `Invalid` - Token signature is invalid, token is malformed or has no subject
    pub fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        self.claims(token)?
            .sub
            .ok_or_else(|| TokenError::Invalid("missing subject".to_string()))
    }

    /// Check that a token belongs to `principal` and has not expired.
    ///
    /// Never fails: unverifiable or expired tokens are simply not valid.
    pub fn is_valid<P: Principal + ?Sized>(&self, token: &str, principal: &P) -> bool {
        match self.claims(token) {
            Ok(claims) => {
                claims.sub.as_deref() == Some(principal.username())
                    && !claims.is_expired(Utc::now().timestamp())
            }
            Err(_) => false,
        }
    }
}
