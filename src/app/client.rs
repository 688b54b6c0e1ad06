use crate::api::{ApiError, Gateway};
use crate::config::ClientConfig;
use crate::navigation::Navigator;
use crate::services::{AuthService, LikeSync, TrackEnricher};
use crate::state::{AuthState, PlaybackSession};
use crate::utils::media::{MediaElement, MediaEvent};
use crate::utils::token_store::{FileTokenStore, TokenStore};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Everything one client process needs, wired once
///
/// Services are cheap handles sharing the same credential store, navigator
/// and HTTP client, so they can be cloned into tasks freely.
pub struct MusicClient {
    config: ClientConfig,
    auth: AuthState,
    navigator: Navigator,
    gateway: Gateway,
    tracks: TrackEnricher,
    likes: LikeSync,
    session: AuthService,
}

impl MusicClient {
    /// Client persisting its credential in `config.storage_path`
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let store = FileTokenStore::open(&config.storage_path)?;
        log::info!("[Client] Storage at {}", store.path().display());
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let auth = AuthState::new(store);
        let navigator = Navigator::new(auth.clone());
        let gateway = Gateway::new(&config, auth.clone(), navigator.clone())?;
        let tracks = TrackEnricher::new(gateway.clone(), config.enrichment_concurrency);
        let likes = LikeSync::new(gateway.clone(), tracks.clone(), config.favorites_cache_ttl);
        let session = AuthService::new(gateway.clone(), auth.clone(), navigator.clone());

        log::info!("[Client] Backend at {}", config.backend_url);

        Ok(Self {
            config,
            auth,
            navigator,
            gateway,
            tracks,
            likes,
            session,
        })
    }

    /// Playback session streaming from this client's backend
    pub fn new_playback_session(
        &self,
        element: Box<dyn MediaElement>,
        events: Receiver<MediaEvent>,
    ) -> PlaybackSession {
        PlaybackSession::new(element, events, self.gateway.base_url().as_str())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn tracks(&self) -> &TrackEnricher {
        &self.tracks
    }

    pub fn likes(&self) -> &LikeSync {
        &self.likes
    }

    pub fn session(&self) -> &AuthService {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::token_helper::tests::token_expiring_in;

    #[test]
    fn test_client_persists_credential_in_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let config = ClientConfig::new("http://backend.local", path.clone()).unwrap();

        let client = MusicClient::new(config).unwrap();
        assert!(!client.session().is_authenticated());

        let token = token_expiring_in(4, 600);
        client.auth().store_token(&token).unwrap();

        let config = ClientConfig::new("http://backend.local", path).unwrap();
        let reopened = MusicClient::new(config).unwrap();
        assert_eq!(reopened.session().current_user_id(), Some(4));
        assert_eq!(reopened.navigator().navigate("/login").unwrap().path, "/");
    }

    #[test]
    fn test_backend_base_is_normalized() {
        let config =
            ClientConfig::new("http://backend.local/api", "/tmp/unused.json".into()).unwrap();
        let client = MusicClient::with_store(
            config,
            Arc::new(crate::utils::token_store::MemoryTokenStore::new()),
        )
        .unwrap();
        assert_eq!(client.gateway().base_url().as_str(), "http://backend.local/api/");
    }
}
