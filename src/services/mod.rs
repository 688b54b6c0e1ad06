/// Services module - business logic layer
///
/// Services sit between callers and the API modules: enrichment of track
/// pages, like-state synchronization and session handling.

pub mod enrichment;
pub mod session;
pub mod social;

// Re-export commonly used types
pub use enrichment::{EnrichedTrack, EnrichmentIssue, TrackEnricher};
pub use session::AuthService;
pub use social::{LikeOutcome, LikeSync};
