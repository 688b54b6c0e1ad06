use crate::constants::UNKNOWN_ARTIST_NAME;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Artist {
    /// Placeholder shown when the artist lookup fails
    pub fn unknown() -> Self {
        Self {
            id: None,
            name: UNKNOWN_ARTIST_NAME.to_string(),
            description: None,
        }
    }
}

/// Body returned by login and register
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub next: String,
}
