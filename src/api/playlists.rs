// Playlist API endpoints
use super::{ApiError, Gateway};
use crate::models::Playlist;

/// All playlists authored by a user
pub async fn fetch_playlists_by_author(
    gateway: &Gateway,
    author_id: u64,
) -> Result<Vec<Playlist>, ApiError> {
    let playlists: Vec<Playlist> = gateway
        .get_json("playlists/", &[("author_id", author_id)])
        .await?;
    log::debug!(
        "[Playlists] User {} has {} playlists",
        author_id,
        playlists.len()
    );
    Ok(playlists)
}

pub async fn add_track(gateway: &Gateway, playlist_id: u64, track_id: u64) -> Result<(), ApiError> {
    gateway
        .post(
            "playlist/track/",
            &[("playlist_id", playlist_id), ("track_id", track_id)],
        )
        .await
}

pub async fn remove_track(
    gateway: &Gateway,
    playlist_id: u64,
    track_id: u64,
) -> Result<(), ApiError> {
    gateway
        .delete(
            "playlist/track/",
            &[("playlist_id", playlist_id), ("track_id", track_id)],
        )
        .await
}
