//! Slay Music client
//!
//! Session-gated navigation, an authenticated backend gateway, track enrichment,
//! favorites-playlist like state and a playback session over a media element.

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;
pub mod utils;

pub use api::{ApiError, Gateway};
pub use app::MusicClient;
pub use config::{ClientConfig, ConfigError};
