use auth::Role;

use crate::context::AuthState;

/// Navigation surfaces a guard decision can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The login/registration form.
    Login,
    /// Admin landing page (user management).
    AdminHome,
    /// Regular user landing page (the coaching chat).
    UserHome,
}

impl Surface {
    /// The landing surface for a role.
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Surface::AdminHome,
            Role::User => Surface::UserHome,
        }
    }
}

/// Outcome of evaluating a protected route against the current auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested route.
    Render,
    /// Redirect instead of rendering; no error is surfaced to the user.
    Redirect(Surface),
}

/// Route guard policy.
///
/// An unauthenticated (or not-yet-loaded) session is sent to the login
/// surface. An authenticated session whose role does not match the route's
/// requirement is sent to its own role's home surface rather than shown an
/// error.
pub fn evaluate(state: AuthState, required_role: Option<Role>) -> RouteDecision {
    match state {
        AuthState::Unknown | AuthState::Unauthenticated => {
            RouteDecision::Redirect(Surface::Login)
        }
        AuthState::Authenticated(role) => match required_role {
            Some(required) if role != required => {
                RouteDecision::Redirect(Surface::home_for(role))
            }
            _ => RouteDecision::Render,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let decision = evaluate(AuthState::Unauthenticated, Some(Role::User));
        assert_eq!(decision, RouteDecision::Redirect(Surface::Login));
    }

    #[test]
    fn test_unknown_state_redirects_to_login() {
        let decision = evaluate(AuthState::Unknown, None);
        assert_eq!(decision, RouteDecision::Redirect(Surface::Login));
    }

    #[test]
    fn test_matching_role_renders() {
        let decision = evaluate(AuthState::Authenticated(Role::Admin), Some(Role::Admin));
        assert_eq!(decision, RouteDecision::Render);
    }

    #[test]
    fn test_no_required_role_renders_for_any_authenticated() {
        for role in [Role::User, Role::Admin] {
            let decision = evaluate(AuthState::Authenticated(role), None);
            assert_eq!(decision, RouteDecision::Render);
        }
    }

    #[test]
    fn test_user_on_admin_route_goes_to_user_home() {
        let decision = evaluate(AuthState::Authenticated(Role::User), Some(Role::Admin));
        assert_eq!(decision, RouteDecision::Redirect(Surface::UserHome));
    }

    #[test]
    fn test_admin_on_user_route_goes_to_admin_home() {
        let decision = evaluate(AuthState::Authenticated(Role::Admin), Some(Role::User));
        assert_eq!(decision, RouteDecision::Redirect(Surface::AdminHome));
    }
}
