use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginGrant;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for registration, login, and the admin
/// management operations.
///
/// Orchestrates the password hasher, the token issuer, and the credential
/// store. Holds no per-request state; concurrent registration races are
/// settled by the repository's uniqueness enforcement.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Create a new user service with injected dependencies.
    pub fn new(repository: Arc<R>, token_issuer: TokenIssuer) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }
}

#[async_trait]
impl<R> UserServicePort for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            role: Role::default(),
            created_at: Utc::now(),
        };

        let created = self.repository.insert(user).await?;

        tracing::info!(user_id = %created.id, username = %created.username, "User registered");

        Ok(created)
    }

    async fn login(&self, username: &Username, password: &str) -> Result<LoginGrant, UserError> {
        // Unknown username and wrong password must fail identically so the
        // response cannot be used to enumerate registered usernames.
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let password_matches = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| UserError::Unknown(format!("Password verification failed: {}", e)))?;

        if !password_matches {
            tracing::warn!(username = %username, "Login failed");
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .token_issuer
            .issue(&user.id.to_string(), user.role)
            .map_err(|e| UserError::Unknown(format!("Token issuance failed: {}", e)))?;

        Ok(LoginGrant {
            token,
            role: user.role,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        let updated = self.repository.update(user).await?;

        tracing::info!(user_id = %updated.id, role = %updated.role, "User updated");

        Ok(updated)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
