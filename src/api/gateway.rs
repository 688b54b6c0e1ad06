//! The single HTTP client every backend call goes through
//!
//! Two cross-cutting behaviors live here and nowhere else: the stored
//! credential is attached as a bearer token to each request, and a 401 response
//! evicts that credential and sends the client to the login page before the
//! failure is handed back to the caller.

use super::error::ApiError;
use crate::config::ClientConfig;
use crate::constants::LOGIN_PATH;
use crate::navigation::Navigator;
use crate::state::auth_state::AuthState;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base: Url,
    auth: AuthState,
    navigator: Navigator,
}

impl Gateway {
    pub fn new(
        config: &ClientConfig,
        auth: AuthState,
        navigator: Navigator,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base: config.backend_url.clone(),
            auth,
            navigator,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a backend-relative path (leading `/` optional)
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    /// Request builder with the bearer credential attached when one is stored
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        log::debug!("[Gateway] {} {}", method, url);

        let builder = self.http.request(method, url);
        Ok(match self.auth.raw_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a prepared request and apply the response policy
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let url = response.url().to_string();
            log::warn!("[Gateway] 401 from {}, dropping credential", url);
            self.auth.clear_session();
            if let Err(e) = self.navigator.navigate(LOGIN_PATH) {
                log::error!("[Gateway] Redirect to login failed: {}", e);
            }
            return Err(ApiError::Unauthorized { url });
        }

        if !status.is_success() {
            let url = response.url().to_string();
            log::warn!("[Gateway] {} returned status {}", url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response)
    }

    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        let response = self.send(builder).await?;
        decode_json(response).await
    }

    pub async fn post_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self
            .request(Method::POST, path)?
            .query(query)
            .json(&serde_json::json!({}));
        let response = self.send(builder).await?;
        decode_json(response).await
    }

    /// POST with an empty JSON body, response body ignored
    pub async fn post<Q>(&self, path: &str, query: &Q) -> Result<(), ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self
            .request(Method::POST, path)?
            .query(query)
            .json(&serde_json::json!({}));
        self.send(builder).await.map(|_| ())
    }

    pub async fn delete<Q>(&self, path: &str, query: &Q) -> Result<(), ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::DELETE, path)?.query(query);
        self.send(builder).await.map(|_| ())
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let url = response.url().to_string();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        url,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::token_store::MemoryTokenStore;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn gateway(base: &str, token: Option<&str>) -> Gateway {
        let config = ClientConfig::new(base, PathBuf::from("/tmp/unused.json")).unwrap();
        let store = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        let auth = AuthState::new(Arc::new(store));
        let navigator = Navigator::new(auth.clone());
        Gateway::new(&config, auth, navigator).unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let gateway = gateway("http://backend.local/api", None);
        assert_eq!(
            gateway.endpoint("/tracks/").unwrap().as_str(),
            "http://backend.local/api/tracks/"
        );
        assert_eq!(
            gateway.endpoint("user/artist/").unwrap().as_str(),
            "http://backend.local/api/user/artist/"
        );
    }

    #[test]
    fn test_bearer_header_only_when_credential_stored() {
        let with = gateway("http://backend.local/", Some("abc.def.ghi"));
        let request = with.request(Method::GET, "tracks/").unwrap().build().unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc.def.ghi"
        );

        let without = gateway("http://backend.local/", None);
        let request = without.request(Method::GET, "tracks/").unwrap().build().unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
