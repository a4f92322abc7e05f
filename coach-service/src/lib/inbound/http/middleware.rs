use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Verified identity attached to the request after the authentication
/// middleware has accepted its bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Authentication middleware.
///
/// A missing or non-bearer Authorization header is 401; a present token
/// that fails verification is 403, with no distinction between a bad
/// signature, a malformed payload, and an expired token. On success the
/// verified claims are attached to the request for downstream handlers and
/// the authorization layer.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.token_verifier.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Invalid or expired token"
            })),
        )
            .into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid user ID");
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Invalid or expired token"
            })),
        )
            .into_response()
    })?;

    req.extensions_mut().insert(CurrentUser {
        user_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Authorization middleware for the admin surface.
///
/// Must be layered after [`authenticate`]; it only inspects the claims that
/// middleware attached and never re-verifies the token itself.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let current_user = req.extensions().get::<CurrentUser>().ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Authentication required"
            })),
        )
            .into_response()
    })?;

    if current_user.role != Role::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Access denied"
            })),
        )
            .into_response());
    }

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let unauthenticated = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Missing bearer token"
            })),
        )
            .into_response()
    };

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?;

    let auth_str = auth_header.to_str().map_err(|_| unauthenticated())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(unauthenticated)?;

    if token.is_empty() {
        return Err(unauthenticated());
    }

    Ok(token)
}
