#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::Url;
use slaymusic::utils::token_store::MemoryTokenStore;
use slaymusic::{ClientConfig, MusicClient};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};
use tiny_http::{Header, Response, Server};

/// One request as the mock backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// In-process HTTP backend answering through a handler closure
///
/// Each request is answered on its own thread, so concurrent client requests
/// overlap on the server side too.
pub struct MockBackend {
    port: u16,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    worker: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    let url = Url::parse(&format!("http://mock{}", request.url())).unwrap();
                    let recorded = Recorded {
                        method: request.method().to_string(),
                        path: url.path().to_string(),
                        query: url.query_pairs().into_owned().collect(),
                        authorization: request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv("Authorization"))
                            .map(|h| h.value.as_str().to_string()),
                    };
                    requests.lock().unwrap().push(recorded.clone());

                    let handler = Arc::clone(&handler);
                    std::thread::spawn(move || {
                        let mut request = request;
                        let mut body = String::new();
                        let _ = request.as_reader().read_to_string(&mut body);

                        let (status, body) = handler(&recorded);
                        let response = Response::from_string(body)
                            .with_status_code(status)
                            .with_header(
                                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                    .unwrap(),
                            );
                        let _ = request.respond(response);
                    });
                }
            })
        };

        Self {
            port,
            server,
            requests,
            worker: Some(worker),
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

pub fn make_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

/// Credential for `user_id` expiring `secs` from now (negative = already expired)
pub fn token_expiring_in(user_id: u64, secs: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    make_token(&serde_json::json!({"id": user_id, "exp": now + secs, "role": "user"}))
}

pub fn config_for(backend: &MockBackend) -> ClientConfig {
    ClientConfig::new(&backend.url(), PathBuf::from("unused-storage.json")).unwrap()
}

pub fn client_with(config: ClientConfig, token: Option<&str>) -> MusicClient {
    let store = match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    };
    MusicClient::with_store(config, Arc::new(store)).unwrap()
}

pub fn client(backend: &MockBackend, token: Option<&str>) -> MusicClient {
    client_with(config_for(backend), token)
}

pub fn not_found() -> (u16, String) {
    (404, r#"{"detail":"Not Found"}"#.to_string())
}
