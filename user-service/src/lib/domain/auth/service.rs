use std::sync::Arc;

use async_trait::async_trait;
use auth::password::is_hashed;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthToken;
use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::auth::models::LoginRequest;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::TokenOwner;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::Login;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::service::hash_password;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Authentication use cases over a user repository.
///
/// Owns no state besides its collaborators; the signing key lives in the
/// shared [`Authenticator`].
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Replace a legacy plaintext credential with its hash.
    ///
    /// Only acts when the stored credential is not hashed and equals
    /// `supplied` exactly. Returns whether the record was rewritten.
    pub async fn migrate_legacy_credential(
        &self,
        user: &User,
        supplied: &str,
    ) -> Result<bool, AuthError> {
        if is_hashed(&user.password) || user.password != supplied {
            return Ok(false);
        }

        tracing::debug!(login = %user.login, "Legacy credential found, rehashing");

        let hashed = hash_password(
            *self.authenticator.password_hasher(),
            supplied.to_string(),
        )
        .await?;

        let mut migrated = user.clone();
        migrated.password = hashed;
        self.repository.update(migrated).await?;

        tracing::info!(user_id = %user.id, "Legacy credential migrated");
        Ok(true)
    }

    /// Load the principal for `login`, check `password` and issue a token.
    async fn authenticate(
        &self,
        login: &Login,
        password: String,
    ) -> Result<(AuthenticatedIdentity, AuthToken), AuthError> {
        let identity = match self.repository.find_by_login(login).await? {
            Some(user) => AuthenticatedIdentity::from(user),
            None => return Err(self.reject_unknown(password).await),
        };

        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || {
            authenticator
                .authenticate(&identity, &password)
                .map(|token| (identity, AuthToken::from(token)))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Credential check task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AuthError::AuthFailed,
            other => AuthError::Internal(other.to_string()),
        })
    }

    /// Spend one decoy password check on the blocking pool, then fail.
    async fn reject_unknown(&self, password: String) -> AuthError {
        let authenticator = Arc::clone(&self.authenticator);

        if let Err(e) =
            tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password)).await
        {
            tracing::warn!(error = %e, "Decoy credential check task failed");
        }

        AuthError::AuthFailed
    }

    fn issue_token(&self, identity: &AuthenticatedIdentity) -> Result<AuthToken, AuthError> {
        self.authenticator
            .generate_token(identity)
            .map(AuthToken::from)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, request: LoginRequest) -> Result<AuthToken, AuthError> {
        tracing::debug!(login = %request.login, "Login attempt");

        let login = match Login::new(request.login) {
            Ok(login) => login,
            Err(_) => return Err(self.reject_unknown(request.password).await),
        };

        let user = match self.repository.find_by_login(&login).await? {
            Some(user) => user,
            None => {
                tracing::debug!(login = %login, "Unknown login");
                return Err(self.reject_unknown(request.password).await);
            }
        };

        self.migrate_legacy_credential(&user, &request.password)
            .await?;

        let (identity, token) = self
            .authenticate(&login, request.password)
            .await
            .inspect_err(|_| tracing::debug!(login = %login, "Credential check failed"))?;

        tracing::info!(user_id = %identity.id, "User logged in");

        Ok(token)
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<AuthToken, AuthError> {
        if command.password.trim().is_empty() {
            return Err(UserError::EmptyData("Password").into());
        }

        if self
            .repository
            .find_by_login(&command.login)
            .await?
            .is_some()
        {
            return Err(UserError::AlreadyExists(command.login.to_string()).into());
        }

        let password = hash_password(*self.authenticator.password_hasher(), command.password).await?;

        let user = User {
            id: UserId::generate(),
            name: command.name,
            login: command.login,
            password,
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, login = %created.login, "User registered");

        self.issue_token(&AuthenticatedIdentity::from(created))
    }

    async fn validate_token(&self, token: &str) -> Result<TokenOwner, AuthError> {
        self.resolve_identity(token)
            .await
            .map(|identity| identity.owner())
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::AuthFailed
            })
    }

    async fn resolve_identity(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        let subject = self.authenticator.subject_of(token)?;
        let login = Login::new(subject).map_err(|_| AuthError::AuthFailed)?;

        let identity = self
            .repository
            .find_by_login(&login)
            .await?
            .map(AuthenticatedIdentity::from)
            .ok_or(AuthError::AuthFailed)?;

        if !self.authenticator.is_token_valid(token, &identity) {
            return Err(AuthError::AuthFailed);
        }

        Ok(identity)
    }
}
