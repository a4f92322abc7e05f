use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Role;
use auth::TokenIssuer;
use auth::TokenVerifier;
use chrono::Duration;
use coach_service::domain::chat::errors::ChatError;
use coach_service::domain::chat::ports::ChatModel;
use coach_service::domain::user::errors::UserError;
use coach_service::domain::user::models::User;
use coach_service::domain::user::models::UserId;
use coach_service::domain::user::models::Username;
use coach_service::domain::user::ports::UserRepository;
use coach_service::domain::user::service::UserService;
use coach_service::inbound::http::router::create_router;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub const STUB_REPLY: &str = "Keep your back straight and drive through your heels.";

/// Test application that spawns the real router on a random port, backed by
/// an in-memory credential store so the suite needs no database.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub issuer: TokenIssuer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());
        let issuer = TokenIssuer::new(TEST_SECRET, Duration::hours(1));
        let user_service = Arc::new(UserService::new(
            repository,
            TokenIssuer::new(TEST_SECRET, Duration::hours(1)),
        ));
        let chat_model = Arc::new(StubChatModel);
        let verifier = Arc::new(TokenVerifier::new(TEST_SECRET));

        let router = create_router(user_service, chat_model, verifier);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            issuer,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user through the API and return the response.
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/register")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute register request")
    }

    /// Log in through the API and return the issued token.
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["data"]["token"]
            .as_str()
            .expect("Login response missing token")
            .to_string()
    }

    /// Mint a token directly, bypassing login. Stateless token auth means
    /// the subject does not have to exist in the store.
    pub fn issue_token(&self, role: Role) -> String {
        self.issuer
            .issue(&Uuid::new_v4().to_string(), role)
            .expect("Failed to issue token")
    }

    /// Mint a token whose expiry is already in the past.
    pub fn issue_expired_token(&self, role: Role) -> String {
        TokenIssuer::new(TEST_SECRET, Duration::minutes(-5))
            .issue(&Uuid::new_v4().to_string(), role)
            .expect("Failed to issue expired token")
    }

    /// Mint a well-formed token signed with the wrong secret.
    pub fn issue_foreign_token(&self, role: Role) -> String {
        TokenIssuer::new(b"some-other-secret-that-is-32-bytes!!", Duration::hours(1))
            .issue(&Uuid::new_v4().to_string(), role)
            .expect("Failed to issue foreign token")
    }
}

/// Credential store over a mutex-guarded map. Uniqueness is enforced under
/// the lock, so concurrent duplicate inserts settle the same way the
/// database constraint does: one winner, the rest see `UsernameTaken`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameTaken(user.username.to_string()));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if !users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        if users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(UserError::UsernameTaken(user.username.to_string()));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        users
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

/// Chat model stub with a canned reply.
pub struct StubChatModel;

#[async_trait]
impl ChatModel for StubChatModel {
    async fn send(&self, _prompt: &str) -> Result<String, ChatError> {
        Ok(STUB_REPLY.to_string())
    }
}
