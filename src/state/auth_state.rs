use crate::utils::token_helper;
use crate::utils::token_store::{StoreError, TokenStore};
use std::sync::Arc;

/// Credential access shared by the guard, the gateway and the session service
#[derive(Clone)]
pub struct AuthState {
    store: Arc<dyn TokenStore>,
}

impl AuthState {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Stored credential as-is, expired or not
    pub fn raw_token(&self) -> Option<String> {
        self.store.get()
    }

    /// Check if user is authenticated (credential present, decodes, unexpired)
    pub fn is_authenticated(&self) -> bool {
        token_helper::is_token_valid(self.raw_token().as_deref())
    }

    /// Get current credential if valid
    pub fn get_token(&self) -> Option<String> {
        self.raw_token()
            .filter(|token| token_helper::is_token_valid(Some(token)))
    }

    /// User id from a valid credential
    pub fn user_id(&self) -> Option<u64> {
        self.get_token()
            .and_then(|token| token_helper::get_user_id(&token))
    }

    pub fn store_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(token)?;
        log::info!("[Auth] Credential stored");
        Ok(())
    }

    /// Clear user session (logout or server rejection)
    pub fn clear_session(&self) {
        match self.store.remove() {
            Ok(()) => log::info!("[Auth] Credential removed"),
            Err(e) => log::error!("[Auth] Failed to remove credential: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::token_helper::tests::token_expiring_in;
    use crate::utils::token_store::MemoryTokenStore;

    #[test]
    fn test_expired_credential_is_held_but_not_authenticated() {
        let expired = token_expiring_in(3, -60);
        let auth = AuthState::new(Arc::new(MemoryTokenStore::with_token(&expired)));

        assert_eq!(auth.raw_token().as_deref(), Some(expired.as_str()));
        assert!(!auth.is_authenticated());
        assert_eq!(auth.get_token(), None);
        assert_eq!(auth.user_id(), None);
    }

    #[test]
    fn test_store_and_clear() {
        let auth = AuthState::new(Arc::new(MemoryTokenStore::new()));
        assert!(!auth.is_authenticated());

        let token = token_expiring_in(11, 600);
        auth.store_token(&token).unwrap();
        assert!(auth.is_authenticated());
        assert_eq!(auth.user_id(), Some(11));

        auth.clear_session();
        assert_eq!(auth.raw_token(), None);
    }
}
