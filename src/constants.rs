//! Application constants and configuration values

// === Application ===
pub const APP_NAME: &str = "Slay Music";
pub const DOCUMENT_TITLE: &str = "Slay Music";

// === Routes ===
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ROOT_PATH: &str = "/";
pub const MAX_REDIRECTS: usize = 4;

// === Credential Storage ===
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const STORAGE_DIR_NAME: &str = "slaymusic";
pub const STORAGE_FILE_NAME: &str = "storage.json";

// === Backend ===
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";
pub const STREAM_ENDPOINT: &str = "track/stream/";
pub const COVER_ENDPOINT: &str = "track/image/";

// === Content ===
pub const FAVORITES_PLAYLIST_NAME: &str = "fav";
pub const UNKNOWN_ARTIST_NAME: &str = "Unknown Artist";
pub const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 1;

// === Audio Playback ===
pub const DEFAULT_DURATION_SECS: f64 = 1.0; // Keeps progress division well-defined before metadata
pub const TIME_UPDATE_INTERVAL_MILLIS: u64 = 250;
