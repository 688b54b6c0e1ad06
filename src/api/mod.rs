// Slay Music backend API client modules

pub mod error;
pub mod gateway;
pub mod playlists;
pub mod tracks;
pub mod users;

// Re-export commonly used types
pub use error::ApiError;
pub use gateway::Gateway;
