use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthToken;
use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::auth::models::LoginRequest;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::TokenOwner;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange login and password for a token.
    ///
    /// Upgrades a legacy plaintext credential to a hash on first successful
    /// use.
    ///
    /// # Errors
    /// * `AuthFailed` - Unknown login or wrong password
    async fn login(&self, request: LoginRequest) -> Result<AuthToken, AuthError>;

    /// Create an account and return a token for it.
    ///
    /// # Errors
    /// * `User(AlreadyExists)` - Login is taken
    /// * `User(EmptyData)` - Password is blank
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthToken, AuthError>;

    /// Return the owner of a valid token.
    ///
    /// # Errors
    /// * `AuthFailed` - Any reason the token is not acceptable
    async fn validate_token(&self, token: &str) -> Result<TokenOwner, AuthError>;

    /// Resolve the identity behind a bearer token.
    ///
    /// # Errors
    /// * `TokenInvalid` - Bad signature or malformed token
    /// * `AuthFailed` - Unknown subject or expired token
    async fn resolve_identity(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError>;
}
