use super::Artist;
use serde::{Deserialize, Serialize};

/// Track record exactly as `GET /tracks/` returns it
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RawTrack {
    pub id: u64,
    pub name: String,
    pub artist_id: u64,
    #[serde(default)]
    pub album_id: Option<u64>,
    #[serde(default)]
    pub genre_id: Option<u64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Track after enrichment: raw fields plus artist, stream/cover URLs and liked flag
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Track {
    pub id: u64,
    pub name: String,
    pub artist_id: u64,
    pub album_id: Option<u64>,
    pub genre_id: Option<u64>,
    pub release_date: Option<String>,
    pub artist: Option<Artist>,
    #[serde(rename = "audioUrl")]
    pub audio_url: Option<String>, // Relative to the backend base
    #[serde(rename = "coverUrl")]
    pub cover_url: Option<String>, // Absolute
    #[serde(rename = "isLiked")]
    pub is_liked: bool,
}

impl Track {
    /// Fresh track from a raw record, derived fields still unset
    pub fn from_raw(raw: RawTrack, is_liked: bool) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            artist_id: raw.artist_id,
            album_id: raw.album_id,
            genre_id: raw.genre_id,
            release_date: raw.release_date,
            artist: None,
            audio_url: None,
            cover_url: None,
            is_liked,
        }
    }

    pub fn artist_name(&self) -> &str {
        self.artist.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }
}

/// Filter parameters understood by `GET /tracks/`; unset fields are not sent
#[derive(Debug, Default, Serialize, Clone, PartialEq)]
pub struct TrackQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TrackQuery {
    pub fn playlist(playlist_id: u64) -> Self {
        Self {
            playlist_id: Some(playlist_id),
            ..Default::default()
        }
    }

    pub fn artist(artist_id: u64) -> Self {
        Self {
            artist_id: Some(artist_id),
            ..Default::default()
        }
    }
}
