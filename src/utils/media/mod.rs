pub mod engine;
#[cfg(feature = "audio")]
pub mod sink;

pub use engine::{MediaElement, MediaError, MediaEvent};
#[cfg(feature = "audio")]
pub use sink::SinkElement;
