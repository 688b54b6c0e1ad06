use super::routes::{normalize_path, RouteDef};
use crate::constants::{LOGIN_PATH, ROOT_PATH};
use crate::state::auth_state::AuthState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Gate run before every navigation
#[derive(Clone)]
pub struct SessionGuard {
    auth: AuthState,
}

impl SessionGuard {
    pub fn new(auth: AuthState) -> Self {
        Self { auth }
    }

    /// Protected route without a valid credential goes to login; login with a
    /// valid credential goes home; everything else proceeds.
    pub fn check(&self, path: &str, route: &RouteDef) -> GuardDecision {
        let authenticated = self.auth.is_authenticated();

        if route.requires_auth && !authenticated {
            log::info!(
                "[Guard] {} requires authentication, redirecting to {}",
                path,
                LOGIN_PATH
            );
            GuardDecision::Redirect(LOGIN_PATH.to_string())
        } else if normalize_path(path) == LOGIN_PATH && authenticated {
            log::info!("[Guard] Already authenticated, redirecting to {}", ROOT_PATH);
            GuardDecision::Redirect(ROOT_PATH.to_string())
        } else {
            GuardDecision::Proceed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::routes::{match_route, ROUTES};
    use crate::utils::token_helper::tests::{make_token, token_expiring_in};
    use crate::utils::token_store::MemoryTokenStore;
    use std::sync::Arc;

    fn guard_with(token: Option<&str>) -> SessionGuard {
        let store = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        SessionGuard::new(AuthState::new(Arc::new(store)))
    }

    fn decide(guard: &SessionGuard, path: &str) -> GuardDecision {
        guard.check(path, &match_route(path))
    }

    #[test]
    fn test_protected_routes_redirect_without_valid_credential() {
        let expired = token_expiring_in(1, -1);
        let malformed = "definitely.not.jwt".to_string();
        let no_exp = make_token(&serde_json::json!({ "id": 1 }));

        let tokens = [
            None,
            Some(expired.as_str()),
            Some(malformed.as_str()),
            Some(no_exp.as_str()),
        ];
        for token in tokens {
            let guard = guard_with(token);
            for route in ROUTES.iter().filter(|r| r.requires_auth) {
                let path = route.path.unwrap();
                assert_eq!(
                    decide(&guard, path),
                    GuardDecision::Redirect(LOGIN_PATH.to_string()),
                    "{} with {:?}",
                    path,
                    token
                );
            }
        }
    }

    #[test]
    fn test_login_with_valid_credential_goes_home() {
        let token = token_expiring_in(1, 600);
        let guard = guard_with(Some(&token));
        assert_eq!(decide(&guard, "/login"), GuardDecision::Redirect("/".to_string()));
        assert_eq!(decide(&guard, "/login/"), GuardDecision::Redirect("/".to_string()));
        assert_eq!(decide(&guard, "/liked"), GuardDecision::Proceed);
        assert_eq!(decide(&guard, "/register"), GuardDecision::Proceed);
    }

    #[test]
    fn test_public_routes_proceed_without_credential() {
        let guard = guard_with(None);
        assert_eq!(decide(&guard, "/login"), GuardDecision::Proceed);
        assert_eq!(decide(&guard, "/register"), GuardDecision::Proceed);
        assert_eq!(decide(&guard, "/no/such/page"), GuardDecision::Proceed);
    }
}
