/// Login, registration and logout
///
/// The backend answers both login and registration with a fresh credential and
/// the page to open next; the credential is stored before navigating so the
/// guard sees the new session.

use crate::api::{self, ApiError, Gateway};
use crate::constants::LOGIN_PATH;
use crate::models::LoginResponse;
use crate::navigation::{Navigation, NavigationError, Navigator};
use crate::state::auth_state::AuthState;

#[derive(Clone)]
pub struct AuthService {
    gateway: Gateway,
    auth: AuthState,
    navigator: Navigator,
}

impl AuthService {
    pub fn new(gateway: Gateway, auth: AuthState, navigator: Navigator) -> Self {
        Self {
            gateway,
            auth,
            navigator,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = api::users::login(&self.gateway, username, password).await?;
        log::info!("[Session] Logged in as {}", username);
        self.start_session(&response)?;
        Ok(response)
    }

    pub async fn register(
        &self,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let response = api::users::register(&self.gateway, name, username, password).await?;
        log::info!("[Session] Registered {}", username);
        self.start_session(&response)?;
        Ok(response)
    }

    fn start_session(&self, response: &LoginResponse) -> Result<(), ApiError> {
        self.auth.store_token(&response.token)?;
        if let Err(e) = self.navigator.navigate(&response.next) {
            log::error!("[Session] Could not open {}: {}", response.next, e);
        }
        Ok(())
    }

    pub fn logout(&self) -> Result<Navigation, NavigationError> {
        self.auth.clear_session();
        log::info!("[Session] Logged out");
        self.navigator.navigate(LOGIN_PATH)
    }

    pub fn current_user_id(&self) -> Option<u64> {
        self.auth.user_id()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }
}
