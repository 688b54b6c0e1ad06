use crate::constants::FAVORITES_PLAYLIST_NAME;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Playlist {
    #[serde(alias = "playlist_id")]
    pub id: u64,
    pub name: String,
    pub author_id: u64,
}

impl Playlist {
    /// The favorites playlist is marked only by its name
    pub fn is_favorites(&self) -> bool {
        self.name == FAVORITES_PLAYLIST_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_playlist_id_field_accepted() {
        let playlist: Playlist = serde_json::from_str(
            r#"{"playlist_id": 7, "author_id": 1, "name": "fav",
                "created_at": "2024-05-01T10:00:00", "updated_at": "2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(playlist.id, 7);
        assert!(playlist.is_favorites());
    }

    #[test]
    fn test_name_match_is_exact() {
        let playlist: Playlist =
            serde_json::from_str(r#"{"id": 2, "author_id": 1, "name": "Fav"}"#).unwrap();
        assert!(!playlist.is_favorites());
    }
}
