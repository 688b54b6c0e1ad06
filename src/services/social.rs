/// Like-state synchronization for tracks
///
/// A track is liked when it is a member of the user's favorites playlist, the
/// playlist named `"fav"`. Liking and unliking mutate that playlist's
/// membership on the backend; nothing is kept locally apart from the optional
/// favorites-id cache.

use crate::api::{self, ApiError, Gateway};
use crate::models::{Playlist, TrackQuery};
use crate::navigation::NavigationToken;
use crate::services::enrichment::TrackEnricher;
use crate::utils::error_handling::safe_lock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Result of a like/unlike request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// Membership change sent to the backend
    Applied { playlist_id: u64 },
    /// User has no favorites playlist; nothing was sent
    FavoritesMissing,
}

impl LikeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LikeOutcome::Applied { .. })
    }
}

/// Id of the favorites playlist in `playlists`; the last one wins on duplicates
pub fn find_favorites_playlist(playlists: &[Playlist]) -> Option<u64> {
    playlists
        .iter()
        .rev()
        .find(|playlist| playlist.is_favorites())
        .map(|playlist| playlist.id)
}

/// Short-lived favorites-id memo keyed by user id
struct FavoritesCache {
    ttl: Option<Duration>,
    entries: Mutex<HashMap<u64, (u64, Instant)>>,
}

impl FavoritesCache {
    fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl: ttl.filter(|ttl| !ttl.is_zero()),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, user_id: u64) -> Option<u64> {
        let ttl = self.ttl?;
        let mut entries = safe_lock(&self.entries, "FavoritesCache");
        match entries.get(&user_id) {
            Some((playlist_id, stored)) if stored.elapsed() < ttl => Some(*playlist_id),
            Some(_) => {
                entries.remove(&user_id);
                None
            }
            None => None,
        }
    }

    fn put(&self, user_id: u64, playlist_id: u64) {
        if self.ttl.is_some() {
            safe_lock(&self.entries, "FavoritesCache")
                .insert(user_id, (playlist_id, Instant::now()));
        }
    }

    fn invalidate(&self, user_id: u64) {
        safe_lock(&self.entries, "FavoritesCache").remove(&user_id);
    }
}

#[derive(Clone)]
pub struct LikeSync {
    gateway: Gateway,
    tracks: TrackEnricher,
    cache: Arc<FavoritesCache>,
}

impl LikeSync {
    pub fn new(gateway: Gateway, tracks: TrackEnricher, cache_ttl: Option<Duration>) -> Self {
        Self {
            gateway,
            tracks,
            cache: Arc::new(FavoritesCache::new(cache_ttl)),
        }
    }

    /// Favorites playlist id of `user_id`, `None` when the user has none
    pub async fn resolve_favorites_playlist(
        &self,
        user_id: u64,
    ) -> Result<Option<u64>, ApiError> {
        if let Some(playlist_id) = self.cache.get(user_id) {
            log::debug!("[Likes] Favorites of user {} cached: {}", user_id, playlist_id);
            return Ok(Some(playlist_id));
        }

        let playlists = api::playlists::fetch_playlists_by_author(&self.gateway, user_id).await?;
        let found = find_favorites_playlist(&playlists);
        if let Some(playlist_id) = found {
            self.cache.put(user_id, playlist_id);
        }
        Ok(found)
    }

    pub async fn like(&self, track_id: u64, user_id: u64) -> Result<LikeOutcome, ApiError> {
        let Some(playlist_id) = self.resolve_favorites_playlist(user_id).await? else {
            log::error!(
                "[Likes] No favorites playlist for user {}, cannot like {}",
                user_id,
                track_id
            );
            return Ok(LikeOutcome::FavoritesMissing);
        };
        self.cache.invalidate(user_id);

        match api::playlists::add_track(&self.gateway, playlist_id, track_id).await {
            Ok(()) => {
                log::info!("[Likes] Liked track {} (playlist {})", track_id, playlist_id);
                Ok(LikeOutcome::Applied { playlist_id })
            }
            Err(e) => {
                log::error!("[Likes] Failed to like track {}: {}", track_id, e);
                Err(e)
            }
        }
    }

    pub async fn unlike(&self, track_id: u64, user_id: u64) -> Result<LikeOutcome, ApiError> {
        let Some(playlist_id) = self.resolve_favorites_playlist(user_id).await? else {
            log::error!(
                "[Likes] No favorites playlist for user {}, cannot unlike {}",
                user_id,
                track_id
            );
            return Ok(LikeOutcome::FavoritesMissing);
        };
        self.cache.invalidate(user_id);

        match api::playlists::remove_track(&self.gateway, playlist_id, track_id).await {
            Ok(()) => {
                log::info!("[Likes] Unliked track {} (playlist {})", track_id, playlist_id);
                Ok(LikeOutcome::Applied { playlist_id })
            }
            Err(e) => {
                log::error!("[Likes] Failed to unlike track {}: {}", track_id, e);
                Err(e)
            }
        }
    }

    pub async fn is_liked(&self, track_id: u64, user_id: u64) -> Result<bool, ApiError> {
        self.is_liked_in(track_id, user_id, &NavigationToken::detached())
            .await
    }

    /// Membership test abandoned once `token` is cancelled
    pub async fn is_liked_in(
        &self,
        track_id: u64,
        user_id: u64,
        token: &NavigationToken,
    ) -> Result<bool, ApiError> {
        let Some(playlist_id) = token.run(self.resolve_favorites_playlist(user_id)).await?? else {
            log::warn!("[Likes] No favorites playlist for user {}", user_id);
            return Ok(false);
        };

        let favorites = self
            .tracks
            .fetch_tracks_in(&TrackQuery::playlist(playlist_id), true, token)
            .await?;
        Ok(favorites.iter().any(|entry| entry.track.id == track_id))
    }

    /// Flip the like state of a track, returning the new flag
    pub async fn toggle_like(&self, track_id: u64, user_id: u64) -> Result<bool, ApiError> {
        let liked = self.is_liked(track_id, user_id).await?;
        let outcome = if liked {
            self.unlike(track_id, user_id).await?
        } else {
            self.like(track_id, user_id).await?
        };

        Ok(if outcome.is_applied() { !liked } else { liked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: u64, name: &str) -> Playlist {
        Playlist {
            id,
            name: name.to_string(),
            author_id: 1,
        }
    }

    #[test]
    fn test_find_favorites_last_match_wins() {
        let playlists = vec![
            playlist(2, "fav"),
            playlist(3, "Road trip"),
            playlist(9, "fav"),
        ];
        assert_eq!(find_favorites_playlist(&playlists), Some(9));
    }

    #[test]
    fn test_find_favorites_none() {
        assert_eq!(find_favorites_playlist(&[]), None);
        assert_eq!(find_favorites_playlist(&[playlist(1, "favs")]), None);
    }

    #[test]
    fn test_cache_disabled_without_ttl() {
        let cache = FavoritesCache::new(None);
        cache.put(1, 7);
        assert_eq!(cache.get(1), None);

        let zero = FavoritesCache::new(Some(Duration::ZERO));
        zero.put(1, 7);
        assert_eq!(zero.get(1), None);
    }

    #[test]
    fn test_cache_invalidate() {
        let cache = FavoritesCache::new(Some(Duration::from_secs(60)));
        cache.put(1, 7);
        assert_eq!(cache.get(1), Some(7));
        assert_eq!(cache.get(2), None);

        cache.invalidate(1);
        assert_eq!(cache.get(1), None);
    }

    #[test]
    fn test_outcome_applied() {
        assert!(LikeOutcome::Applied { playlist_id: 3 }.is_applied());
        assert!(!LikeOutcome::FavoritesMissing.is_applied());
    }
}
