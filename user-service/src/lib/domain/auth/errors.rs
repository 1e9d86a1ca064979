use thiserror::Error;

use crate::user::errors::UserError;

/// Errors of the authentication use cases.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login, password or token rejected. Carries no detail.
    #[error("Invalid credentials")]
    AuthFailed,

    #[error("Invalid token: {0}")]
    TokenInvalid(#[from] auth::TokenError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Internal error: {0}")]
    Internal(String),
}
