use std::str::FromStr;

use auth::Role;

use crate::storage::SessionStorage;
use crate::storage::ROLE_KEY;
use crate::storage::TOKEN_KEY;

/// Client-side authentication state.
///
/// Starts at `Unknown` until [`AuthContext::load`] has consulted persisted
/// storage, then moves between `Authenticated` and `Unauthenticated` through
/// the login/logout transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Persisted storage has not been consulted yet.
    Unknown,
    Authenticated(Role),
    Unauthenticated,
}

/// Owner of the client's persisted token/role pair and the state derived
/// from it.
///
/// Intended to be constructed once per client session and passed to the
/// route guard, rather than read through a global.
pub struct AuthContext<S: SessionStorage> {
    storage: S,
    state: AuthState,
}

impl<S: SessionStorage> AuthContext<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: AuthState::Unknown,
        }
    }

    /// Populate state from persisted storage.
    ///
    /// Trusts the persisted role as-is: the token's signature and expiry are
    /// not re-checked here, the server re-verifies on every request. A
    /// missing or unparsable role leaves the session unauthenticated.
    pub fn load(&mut self) -> AuthState {
        let token = self.storage.get(TOKEN_KEY);
        let role = self
            .storage
            .get(ROLE_KEY)
            .and_then(|r| Role::from_str(&r).ok());

        self.state = match (token, role) {
            (Some(_), Some(role)) => AuthState::Authenticated(role),
            _ => AuthState::Unauthenticated,
        };

        tracing::debug!(state = ?self.state, "Session restored from storage");
        self.state
    }

    /// Record a successful login: persist the token and role, move to
    /// `Authenticated`.
    pub fn login(&mut self, token: &str, role: Role) {
        self.storage.set(TOKEN_KEY, token);
        self.storage.set(ROLE_KEY, role.as_str());
        self.state = AuthState::Authenticated(role);

        tracing::debug!(%role, "Session authenticated");
    }

    /// Erase the persisted token and role, move to `Unauthenticated`.
    ///
    /// Local erasure only; the issued token stays valid until its expiry.
    pub fn logout(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(ROLE_KEY);
        self.state = AuthState::Unauthenticated;

        tracing::debug!("Session cleared");
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self.state {
            AuthState::Authenticated(role) => Some(role),
            _ => None,
        }
    }

    /// The persisted token, for attaching to outgoing requests.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_starts_unknown() {
        let context = AuthContext::new(MemoryStorage::new());
        assert_eq!(context.state(), AuthState::Unknown);
    }

    #[test]
    fn test_load_without_persisted_values() {
        let mut context = AuthContext::new(MemoryStorage::new());
        assert_eq!(context.load(), AuthState::Unauthenticated);
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_load_with_persisted_values() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "some.signed.token");
        storage.set(ROLE_KEY, "admin");

        let mut context = AuthContext::new(storage);
        assert_eq!(context.load(), AuthState::Authenticated(Role::Admin));
        assert_eq!(context.role(), Some(Role::Admin));
        assert_eq!(context.token(), Some("some.signed.token".to_string()));
    }

    #[test]
    fn test_load_with_unparsable_role() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "some.signed.token");
        storage.set(ROLE_KEY, "superuser");

        let mut context = AuthContext::new(storage);
        assert_eq!(context.load(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_login_persists_and_transitions() {
        let mut context = AuthContext::new(MemoryStorage::new());
        context.load();

        context.login("signed.token", Role::User);
        assert_eq!(context.state(), AuthState::Authenticated(Role::User));
        assert_eq!(context.token(), Some("signed.token".to_string()));
    }

    #[test]
    fn test_logout_erases_and_transitions() {
        let mut context = AuthContext::new(MemoryStorage::new());
        context.login("signed.token", Role::User);

        context.logout();
        assert_eq!(context.state(), AuthState::Unauthenticated);
        assert_eq!(context.token(), None);
    }

    #[test]
    fn test_login_survives_reload() {
        let mut storage = MemoryStorage::new();
        {
            let mut context = AuthContext::new(&mut storage);
            context.login("signed.token", Role::Admin);
        }

        let mut context = AuthContext::new(storage);
        assert_eq!(context.load(), AuthState::Authenticated(Role::Admin));
    }
}
