// Data models for Slay Music backend entities

pub mod playlist;
pub mod track;
pub mod user;

// Re-export commonly used types
pub use playlist::Playlist;
pub use track::{RawTrack, Track, TrackQuery};
pub use user::{Artist, LoginResponse};
