use std::fmt;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::Login;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Login attempt as received from the client.
///
/// The login is kept raw: a malformed login must fail the same way an
/// unknown one does.
#[derive(Clone)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

/// Command to register a new account.
pub struct RegisterUserCommand {
    pub name: DisplayName,
    pub login: Login,
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(name: DisplayName, login: Login, password: String) -> Self {
        Self {
            name,
            login,
            password,
        }
    }
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("name", &self.name)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

/// Signed bearer token handed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Public projection of the user a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOwner {
    pub id: UserId,
    pub login: Login,
    pub name: DisplayName,
}

/// Identity established for a single request from a validated token.
///
/// Carries the stored credential so it can act as an [`auth::Principal`];
/// the credential never leaves the process.
#[derive(Clone)]
pub struct AuthenticatedIdentity {
    pub id: UserId,
    pub login: Login,
    pub name: DisplayName,
    credential_hash: String,
}

impl AuthenticatedIdentity {
    pub fn owner(&self) -> TokenOwner {
        TokenOwner {
            id: self.id.clone(),
            login: self.login.clone(),
            name: self.name.clone(),
        }
    }
}

impl From<User> for AuthenticatedIdentity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            name: user.name,
            credential_hash: user.password,
        }
    }
}

impl fmt::Debug for AuthenticatedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedIdentity")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl auth::Principal for AuthenticatedIdentity {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn username(&self) -> &str {
        self.login.as_str()
    }

    fn credential_hash(&self) -> &str {
        &self.credential_hash
    }
}
