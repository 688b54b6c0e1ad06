use crate::constants::DEFAULT_DURATION_SECS;
use crate::models::Track;
use crate::utils::formatting::format_time;
use crate::utils::media::{MediaElement, MediaEvent};
use std::sync::mpsc::{Receiver, TryRecvError};

/// Transport state derived from the session fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Playing,
    Paused,
}

/// The one playback session of the client
///
/// Owns the media element (reused across tracks) and the receiving end of its
/// event channel. Time, duration and progress only move when events are
/// drained with `sync()` or when the caller seeks.
pub struct PlaybackSession {
    element: Box<dyn MediaElement>,
    events: Receiver<MediaEvent>,
    stream_base: String,

    // Loaded track and display fields
    track: Option<Track>,
    title: String,
    author: String,
    cover_url: String,
    is_liked: bool,

    // Transport
    current_time: f64,
    duration: f64,
    progress: f64,
    is_playing: bool,
    last_error: Option<String>,
}

impl PlaybackSession {
    /// `stream_base` is prefixed to each track's relative `audioUrl`
    pub fn new(
        element: Box<dyn MediaElement>,
        events: Receiver<MediaEvent>,
        stream_base: impl Into<String>,
    ) -> Self {
        Self {
            element,
            events,
            stream_base: stream_base.into(),
            track: None,
            title: String::new(),
            author: String::new(),
            cover_url: String::new(),
            is_liked: false,
            current_time: 0.0,
            duration: DEFAULT_DURATION_SECS,
            progress: 0.0,
            is_playing: false,
            last_error: None,
        }
    }

    /// Load `track` into the element and start it
    pub fn set_track(&mut self, track: Track) {
        let source = format!(
            "{}{}",
            self.stream_base,
            track.audio_url.as_deref().unwrap_or_default()
        );
        log::info!("[Player] Loading track {} from {}", track.id, source);

        self.title = track.name.clone();
        self.author = track.artist_name().to_string();
        self.cover_url = track.cover_url.clone().unwrap_or_default();
        self.is_liked = track.is_liked;
        self.track = Some(track);

        self.current_time = 0.0;
        self.duration = DEFAULT_DURATION_SECS;
        self.progress = 0.0;
        self.last_error = None;

        self.element.set_source(&source);
        self.start();
    }

    pub fn toggle_play(&mut self) {
        if !self.is_playing {
            self.start();
        } else {
            self.element.pause();
            self.is_playing = false;
            log::debug!("[Player] Paused at {}", self.formatted_time());
        }
    }

    /// Jump to `percentage` of the current duration (clamped to 0..=100)
    pub fn seek(&mut self, percentage: f64) {
        let percentage = if percentage.is_nan() {
            0.0
        } else {
            percentage.clamp(0.0, 100.0)
        };
        let position = percentage / 100.0 * self.duration;

        self.element.seek_to(position);
        self.current_time = position;
        self.update_progress();
    }

    /// Drain pending element events; returns how many were applied
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.on_media_event(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("[Player] Media event channel closed");
                    break;
                }
            }
        }
        applied
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate {
                current_time,
                duration,
            } => {
                self.current_time = if current_time.is_finite() {
                    current_time.max(0.0)
                } else {
                    0.0
                };
                self.duration = match duration {
                    Some(d) if d.is_finite() && d > 0.0 => d,
                    _ => DEFAULT_DURATION_SECS,
                };
                self.update_progress();
            }
            MediaEvent::Ended => {
                log::info!("[Player] Track finished");
                self.element.pause();
                self.is_playing = false;
            }
            MediaEvent::Error(message) => {
                log::error!("[Player] Media error: {}", message);
                self.last_error = Some(message);
                self.element.pause();
                self.is_playing = false;
            }
        }
    }

    /// Mirror a like toggle onto the loaded track
    pub fn set_liked(&mut self, liked: bool) {
        self.is_liked = liked;
        if let Some(track) = self.track.as_mut() {
            track.is_liked = liked;
        }
    }

    fn start(&mut self) {
        match self.element.play() {
            Ok(()) => {
                self.is_playing = true;
            }
            Err(e) => {
                log::error!("[Player] Playback failed: {}", e);
                self.last_error = Some(e.to_string());
                self.is_playing = false;
            }
        }
    }

    fn update_progress(&mut self) {
        self.progress = self.current_time / self.duration * 100.0;
    }

    pub fn state(&self) -> TransportState {
        match (&self.track, self.is_playing) {
            (_, true) => TransportState::Playing,
            (None, false) => TransportState::Idle,
            (Some(_), false) => TransportState::Paused,
        }
    }

    pub fn formatted_time(&self) -> String {
        format_time(self.current_time)
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn cover_url(&self) -> &str {
        &self.cover_url
    }

    pub fn is_liked(&self) -> bool {
        self.is_liked
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
