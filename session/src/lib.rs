//! Client-side session library
//!
//! Models the browser-side authentication cache as an explicit state
//! container instead of ambient global state: a [`context::AuthContext`]
//! owns the persisted token/role pair and exposes defined transitions
//! (load, login, logout), and [`guard::evaluate`] turns the current state
//! plus a route's role requirement into a navigation decision.
//!
//! The server holds no session state; everything here is derived from the
//! locally persisted `token` and `userRole` values. Logging out only erases
//! those values, it cannot invalidate an already-issued token.

pub mod context;
pub mod guard;
pub mod storage;

pub use context::AuthContext;
pub use context::AuthState;
pub use guard::evaluate;
pub use guard::RouteDecision;
pub use guard::Surface;
pub use storage::MemoryStorage;
pub use storage::SessionStorage;
