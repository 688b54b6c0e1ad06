// rodio-backed media element (feature `audio`)
//
// Sources are downloaded whole with the blocking HTTP client and decoded in
// memory, so `play` must not be called from inside an async runtime.

use super::engine::{MediaElement, MediaError, MediaEvent};
use crate::constants::TIME_UPDATE_INTERVAL_MILLIS;
use crate::utils::error_handling::safe_lock;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct SinkElement {
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Arc<Sink>,
    http: reqwest::blocking::Client,
    source: Option<String>,
    loaded_source: Option<String>,
    duration: Arc<Mutex<Option<Duration>>>,
    has_media: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    events: Sender<MediaEvent>,
}

impl SinkElement {
    /// Open the default output device and start the time-update monitor
    pub fn new(events: Sender<MediaEvent>) -> Result<Self, MediaError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| MediaError::Output(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| MediaError::Output(e.to_string()))?;
        sink.pause();

        let element = Self {
            _stream: stream,
            _handle: handle,
            sink: Arc::new(sink),
            http: reqwest::blocking::Client::new(),
            source: None,
            loaded_source: None,
            duration: Arc::new(Mutex::new(None)),
            has_media: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
            events,
        };
        element.start_monitor();
        Ok(element)
    }

    fn start_monitor(&self) {
        let sink = Arc::clone(&self.sink);
        let duration = Arc::clone(&self.duration);
        let has_media = Arc::clone(&self.has_media);
        let shutdown = Arc::clone(&self.shutdown);
        let events = self.events.clone();

        std::thread::spawn(move || loop {
            std::thread::sleep(Duration::from_millis(TIME_UPDATE_INTERVAL_MILLIS));
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            if !has_media.load(Ordering::Relaxed) || sink.is_paused() {
                continue;
            }

            let event = if sink.empty() {
                has_media.store(false, Ordering::Relaxed);
                MediaEvent::Ended
            } else {
                MediaEvent::TimeUpdate {
                    current_time: sink.get_pos().as_secs_f64(),
                    duration: (*safe_lock(&duration, "SinkElement")).map(|d| d.as_secs_f64()),
                }
            };

            if events.send(event).is_err() {
                log::debug!("[SinkElement] Event receiver gone, stopping monitor");
                break;
            }
        });
    }

    fn load(&mut self, url: &str) -> Result<(), MediaError> {
        log::info!("[SinkElement] Loading {}", url);
        let bytes = self
            .http
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| MediaError::Load(e.to_string()))?;

        let decoder = Decoder::new(Cursor::new(bytes.to_vec()))
            .map_err(|e| MediaError::Decode(e.to_string()))?;
        *safe_lock(&self.duration, "SinkElement") = decoder.total_duration();

        self.sink.clear();
        self.sink.append(decoder);
        self.loaded_source = Some(url.to_string());
        self.has_media.store(true, Ordering::Relaxed);
        Ok(())
    }
}

impl MediaElement for SinkElement {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let url = self.source.clone().ok_or(MediaError::NoSource)?;
        let loaded = self.loaded_source.as_deref() == Some(url.as_str())
            && self.has_media.load(Ordering::Relaxed);
        if !loaded {
            self.load(&url)?;
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn seek_to(&mut self, seconds: f64) {
        let position = Duration::from_secs_f64(seconds.max(0.0));
        if let Err(e) = self.sink.try_seek(position) {
            log::warn!("[SinkElement] Seek to {:.1}s failed: {}", seconds, e);
        }
    }
}

impl Drop for SinkElement {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.sink.stop();
    }
}
