// Track API endpoints
use super::{ApiError, Gateway};
use crate::constants::{COVER_ENDPOINT, STREAM_ENDPOINT};
use crate::models::{RawTrack, TrackQuery};

/// Raw track page for a filter query
pub async fn fetch_tracks(
    gateway: &Gateway,
    query: &TrackQuery,
) -> Result<Vec<RawTrack>, ApiError> {
    let tracks: Vec<RawTrack> = gateway.get_json("tracks/", query).await?;
    log::debug!("[Tracks] Fetched {} raw tracks for {:?}", tracks.len(), query);
    Ok(tracks)
}

/// Stream endpoint relative to the backend base (the player resolves it)
pub fn stream_path(track_id: u64) -> String {
    format!("{}?id={}", STREAM_ENDPOINT, track_id)
}

/// Absolute cover image URL
pub fn cover_url(gateway: &Gateway, track_id: u64) -> Result<String, ApiError> {
    let path = format!("{}?id={}", COVER_ENDPOINT, track_id);
    Ok(gateway.endpoint(&path)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_path_is_relative() {
        assert_eq!(stream_path(12), "track/stream/?id=12");
    }
}
