use std::sync::Arc;
use std::time::Duration;

use auth::TokenVerifier;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::chat::chat;
use super::handlers::delete_user::delete_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_admin;
use crate::domain::chat::ports::ChatModel;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chat_model: Arc<dyn ChatModel>,
    pub token_verifier: Arc<TokenVerifier>,
}

/// Assemble the API router.
///
/// Three tiers: public (register/login), authenticated (chat), and admin
/// (user management). The admin tier layers authentication under
/// authorization so claims are always populated before the role check
/// runs.
pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    chat_model: Arc<dyn ChatModel>,
    token_verifier: Arc<TokenVerifier>,
) -> Router {
    let state = AppState {
        user_service,
        chat_model,
        token_verifier,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login));

    let authenticated_routes = Router::new()
        .route("/api/chat", post(chat))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Layers run outermost-last: authenticate first, then require_admin.
    let admin_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/:user_id", put(update_user))
        .route("/api/users/:user_id", delete(delete_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
