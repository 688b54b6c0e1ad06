use super::cancel::{NavigationScope, NavigationToken};
use super::guard::{GuardDecision, SessionGuard};
use super::routes::{match_route, normalize_path, RouteDef};
use crate::constants::{DOCUMENT_TITLE, MAX_REDIRECTS};
use crate::state::auth_state::AuthState;
use crate::utils::error_handling::safe_lock;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Redirect loop while navigating to {0}")]
    RedirectLoop(String),
}

/// Outcome of one committed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub path: String,
    pub route: RouteDef,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        normalize_path(&self.requested) != self.path
    }
}

#[derive(Default)]
struct NavigatorState {
    current: Option<Navigation>,
    history: Vec<String>,
    document_title: String,
}

/// Client-side router: runs the guard, follows redirects, records the page
#[derive(Clone)]
pub struct Navigator {
    guard: SessionGuard,
    state: Arc<Mutex<NavigatorState>>,
    scope: Arc<NavigationScope>,
}

impl Navigator {
    pub fn new(auth: AuthState) -> Self {
        Self {
            guard: SessionGuard::new(auth),
            state: Arc::new(Mutex::new(NavigatorState::default())),
            scope: Arc::new(NavigationScope::new()),
        }
    }

    /// Navigate to `path`; every hop sets the title and re-runs the guard
    pub fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        let mut target = normalize_path(path);

        for _ in 0..=MAX_REDIRECTS {
            self.set_document_title(DOCUMENT_TITLE);
            let route = match_route(&target);

            match self.guard.check(&target, &route) {
                GuardDecision::Proceed => {
                    let navigation = Navigation {
                        requested: path.to_string(),
                        path: target,
                        route,
                    };
                    self.commit(&navigation);
                    return Ok(navigation);
                }
                GuardDecision::Redirect(next) => {
                    log::debug!("[Navigator] {} -> {}", target, next);
                    target = normalize_path(&next);
                }
            }
        }

        log::error!("[Navigator] Gave up navigating to {}", path);
        Err(NavigationError::RedirectLoop(path.to_string()))
    }

    fn commit(&self, navigation: &Navigation) {
        {
            let mut state = safe_lock(&self.state, "Navigator");
            state.history.push(navigation.path.clone());
            state.current = Some(navigation.clone());
        }
        let generation = self.scope.advance();
        log::info!(
            "[Navigator] Now at {} (generation {})",
            navigation.path,
            generation
        );
    }

    fn set_document_title(&self, title: &str) {
        safe_lock(&self.state, "Navigator").document_title = title.to_string();
    }

    pub fn current(&self) -> Option<Navigation> {
        safe_lock(&self.state, "Navigator").current.clone()
    }

    pub fn current_path(&self) -> Option<String> {
        self.current().map(|navigation| navigation.path)
    }

    /// Whether the current page shows the persistent player
    pub fn shows_player(&self) -> bool {
        self.current()
            .map(|navigation| navigation.route.shows_player)
            .unwrap_or(false)
    }

    pub fn document_title(&self) -> String {
        safe_lock(&self.state, "Navigator").document_title.clone()
    }

    pub fn history(&self) -> Vec<String> {
        safe_lock(&self.state, "Navigator").history.clone()
    }

    /// Token cancelled by the next committed navigation
    pub fn token(&self) -> NavigationToken {
        self.scope.token()
    }
}
