//! Track enrichment pipeline
//!
//! Turns a raw `GET /tracks/` page into display-ready tracks: artist looked up
//! per track, stream and cover URLs derived from the id, liked flag copied from
//! the caller. Only the page fetch itself can fail the call; each per-track
//! failure is masked with a default and reported on that item instead.
//!
//! Artist lookups run `concurrency` at a time (1 by default, i.e. track N+1
//! is not looked up before track N finishes) and results keep page order.

use crate::api::{self, ApiError, Gateway};
use crate::models::{Artist, RawTrack, Track, TrackQuery};
use crate::navigation::NavigationToken;
use futures_util::stream::{self, StreamExt};

/// Why one track came back with a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentIssue {
    ArtistUnavailable { artist_id: u64, reason: String },
    CoverUrl { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrack {
    pub track: Track,
    pub issues: Vec<EnrichmentIssue>,
}

impl EnrichedTrack {
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Drop per-item reports, keeping tracks in order
pub fn into_tracks(entries: Vec<EnrichedTrack>) -> Vec<Track> {
    entries.into_iter().map(|entry| entry.track).collect()
}

#[derive(Clone)]
pub struct TrackEnricher {
    gateway: Gateway,
    concurrency: usize,
}

impl TrackEnricher {
    pub fn new(gateway: Gateway, concurrency: usize) -> Self {
        Self {
            gateway,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn fetch_tracks(
        &self,
        query: &TrackQuery,
        is_liked: bool,
    ) -> Result<Vec<EnrichedTrack>, ApiError> {
        self.fetch_tracks_in(query, is_liked, &NavigationToken::detached())
            .await
    }

    /// Same as `fetch_tracks`, abandoned with `ApiError::Cancelled` once `token` is
    pub async fn fetch_tracks_in(
        &self,
        query: &TrackQuery,
        is_liked: bool,
        token: &NavigationToken,
    ) -> Result<Vec<EnrichedTrack>, ApiError> {
        let raw = token
            .run(api::tracks::fetch_tracks(&self.gateway, query))
            .await??;
        let total = raw.len();

        let enriched: Vec<EnrichedTrack> = token
            .run(
                stream::iter(raw)
                    .map(|raw| self.enrich(raw, is_liked))
                    .buffered(self.concurrency)
                    .collect(),
            )
            .await?;

        let degraded = enriched.iter().filter(|entry| !entry.is_complete()).count();
        if degraded > 0 {
            log::warn!(
                "[Enrichment] {} of {} tracks enriched with placeholders",
                degraded,
                total
            );
        } else {
            log::info!("[Enrichment] Enriched {} tracks", total);
        }

        Ok(enriched)
    }

    /// Plain tracks, placeholders included
    pub async fn fetch_track_list(
        &self,
        query: &TrackQuery,
        is_liked: bool,
    ) -> Result<Vec<Track>, ApiError> {
        Ok(into_tracks(self.fetch_tracks(query, is_liked).await?))
    }

    async fn enrich(&self, raw: RawTrack, is_liked: bool) -> EnrichedTrack {
        let mut track = Track::from_raw(raw, is_liked);
        let mut issues = Vec::new();

        let artist = match api::users::fetch_artist(&self.gateway, track.artist_id).await {
            Ok(artist) => artist,
            Err(e) => {
                log::warn!(
                    "[Enrichment] Artist {} for track {} unavailable: {}",
                    track.artist_id,
                    track.id,
                    e
                );
                issues.push(EnrichmentIssue::ArtistUnavailable {
                    artist_id: track.artist_id,
                    reason: e.to_string(),
                });
                Artist::unknown()
            }
        };
        track.artist = Some(artist);

        track.audio_url = Some(api::tracks::stream_path(track.id));

        let cover = match api::tracks::cover_url(&self.gateway, track.id) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("[Enrichment] Cover URL for track {} failed: {}", track.id, e);
                issues.push(EnrichmentIssue::CoverUrl {
                    reason: e.to_string(),
                });
                String::new()
            }
        };
        track.cover_url = Some(cover);

        EnrichedTrack { track, issues }
    }
}
