use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginGrant;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for user domain service operations: the authentication flows plus
/// the admin management surface.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with the default `user` role.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password; callers
    ///   cannot tell which
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<LoginGrant, UserError>;

    /// Retrieve all users for the admin surface.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update a user's username and/or role.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameTaken` - New username is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the credential store.
///
/// Username uniqueness is enforced here at write time; with concurrent
/// inserts of the same username exactly one succeeds and the rest observe
/// `UsernameTaken`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by username (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve a user by identifier (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Update an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameTaken` - New username is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
