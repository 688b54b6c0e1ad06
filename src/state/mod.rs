pub mod auth_state;
pub mod playback;

pub use auth_state::AuthState;
pub use playback::{PlaybackSession, TransportState};
