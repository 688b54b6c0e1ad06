use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("No media source set")]
    NoSource,

    #[error("Failed to load media source: {0}")]
    Load(String),

    #[error("Failed to decode media: {0}")]
    Decode(String),

    #[error("Audio output error: {0}")]
    Output(String),
}

/// Notifications a media element emits while it works
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Periodic position report; `duration` is `None` until metadata is known
    TimeUpdate {
        current_time: f64,
        duration: Option<f64>,
    },
    Ended,
    Error(String),
}

/// One playable element: a single source slot reused across tracks
///
/// Positions are in seconds. Elements report progress through the event
/// channel they were created with, never through return values.
pub trait MediaElement {
    fn set_source(&mut self, url: &str);
    fn source(&self) -> Option<&str>;
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn seek_to(&mut self, seconds: f64);
}
