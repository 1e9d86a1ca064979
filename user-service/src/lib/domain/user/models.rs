use std::fmt;

use uuid::Uuid;

use crate::user::errors::DisplayNameError;
use crate::user::errors::LoginError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. `password` holds a bcrypt hash, except
/// for legacy records that still carry a plaintext credential until their
/// owner's next successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub login: Login,
    pub password: String,
}

/// User unique identifier type
///
/// Opaque, server-generated and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId holding a UUID v4 rendered as text
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier.
    ///
    /// # Errors
    /// * `Blank` - Identifier is empty or whitespace only
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdError> {
        let id = id.into();
        if id.trim().is_empty() {
            Err(UserIdError::Blank)
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login value type
///
/// Case-sensitive, unique across users and used as the token subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `Blank` - Login is empty or whitespace only
    /// * `TooLong` - Login longer than 255 characters
    pub fn new(login: impl Into<String>) -> Result<Self, LoginError> {
        let login = login.into();
        let length = login.chars().count();
        if login.trim().is_empty() {
            Err(LoginError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(login))
        }
    }

    /// Get login as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: impl Into<String>) -> Result<Self, DisplayNameError> {
        let name = name.into();
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(DisplayNameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to update an existing user.
///
/// Replaces every mutable field; the plaintext password is hashed by the
/// service before it reaches storage.
pub struct UpdateUserCommand {
    pub name: DisplayName,
    pub login: Login,
    pub password: String,
}

impl UpdateUserCommand {
    pub fn new(name: DisplayName, login: Login, password: String) -> Self {
        Self {
            name,
            login,
            password,
        }
    }
}

impl fmt::Debug for UpdateUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserCommand")
            .field("name", &self.name)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_blank() {
        assert_eq!(UserId::new(""), Err(UserIdError::Blank));
        assert_eq!(UserId::new("   "), Err(UserIdError::Blank));
        assert_eq!(UserId::new("6708969a6b07f64a6d295795").unwrap().as_str(), "6708969a6b07f64a6d295795");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let lower = Login::new("alice").unwrap();
        let upper = Login::new("Alice").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_login_validation() {
        assert_eq!(Login::new(" "), Err(LoginError::Blank));
        assert!(matches!(
            Login::new("a".repeat(256)),
            Err(LoginError::TooLong { max: 255, actual: 256 })
        ));
    }

    #[test]
    fn test_display_name_bounds() {
        assert!(DisplayName::new("A").is_ok());
        assert!(DisplayName::new("A".repeat(255)).is_ok());
        assert_eq!(DisplayName::new(""), Err(DisplayNameError::Blank));
    }

    #[test]
    fn test_update_command_debug_hides_password() {
        let command = UpdateUserCommand::new(
            DisplayName::new("Alice").unwrap(),
            Login::new("alice").unwrap(),
            "hunter2".to_string(),
        );

        let debug = format!("{:?}", command);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
