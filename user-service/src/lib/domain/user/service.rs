use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher applied to passwords before storage
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

/// Hash a password on the blocking pool.
pub(crate) async fn hash_password(
    hasher: PasswordHasher,
    password: String,
) -> Result<String, UserError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
        .map_err(UserError::from)
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if command.password.trim().is_empty() {
            return Err(UserError::EmptyData("Password"));
        }

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if user.login != command.login {
            if let Some(owner) = self.repository.find_by_login(&command.login).await? {
                if owner.id != user.id {
                    return Err(UserError::AlreadyExists(command.login.to_string()));
                }
            }
        }

        user.name = command.name;
        user.login = command.login;
        user.password = hash_password(self.password_hasher, command.password).await?;

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::Login;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    pub(crate) fn test_user(id: &str, login: &str, password: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            name: DisplayName::new("Test User").unwrap(),
            login: Login::new(login).unwrap(),
            password: password.to_string(),
        }
    }

    fn update_command(name: &str, login: &str, password: &str) -> UpdateUserCommand {
        UpdateUserCommand::new(
            DisplayName::new(name).unwrap(),
            Login::new(login).unwrap(),
            password.to_string(),
        )
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let expected_user = test_user("userId", "testUser", "$2b$10$test_hash");
        let returned_user = expected_user.clone();
        repository
            .expect_find_by_id()
            .withf(|id| id.as_str() == "userId")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let user = service.get_user(&expected_user.id).await.unwrap();
        assert_eq!(user, expected_user);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service.get_user(&UserId::new("missing").unwrap()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                test_user("1", "alice", "$2b$10$a"),
                test_user("2", "bob", "$2b$10$b"),
            ])
        });

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let mut repository = MockTestUserRepository::new();

        let returned_user = test_user("userId", "oldLogin", "oldPassword");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));
        repository
            .expect_find_by_login()
            .withf(|login| login.as_str() == "newLogin")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_update()
            .withf(|user| {
                user.id.as_str() == "userId"
                    && user.name.as_str() == "newName"
                    && user.login.as_str() == "newLogin"
                    && auth::password::is_hashed(&user.password)
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let updated_user = service
            .update_user(
                &UserId::new("userId").unwrap(),
                update_command("newName", "newLogin", "newPassword"),
            )
            .await
            .unwrap();

        assert_eq!(updated_user.login.as_str(), "newLogin");
        assert!(PasswordHasher::new().verify("newPassword", &updated_user.password));
    }

    #[tokio::test]
    async fn test_update_user_blank_password() {
        // No expectations: any repository call fails the test
        let repository = MockTestUserRepository::new();
        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service
            .update_user(
                &UserId::new("userId").unwrap(),
                update_command("name", "login", "  "),
            )
            .await;

        assert!(matches!(result.unwrap_err(), UserError::EmptyData(_)));
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service
            .update_user(
                &UserId::new("userId").unwrap(),
                update_command("testName", "testUser", "testPassword"),
            )
            .await;

        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_login_taken() {
        let mut repository = MockTestUserRepository::new();

        let existing = test_user("userId", "oldLogin", "$2b$10$x");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_find_by_login()
            .times(1)
            .returning(|_| Ok(Some(test_user("otherId", "taken", "$2b$10$y"))));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service
            .update_user(
                &UserId::new("userId").unwrap(),
                update_command("name", "taken", "password"),
            )
            .await;

        assert!(matches!(result.unwrap_err(), UserError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_delete()
            .withf(|id| id.as_str() == "userId")
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service.delete_user(&UserId::new("userId").unwrap()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service.delete_user(&UserId::new("userId").unwrap()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
