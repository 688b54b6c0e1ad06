// User and artist API endpoints
use super::{ApiError, Gateway};
use crate::models::{Artist, LoginResponse};

pub async fn fetch_artist(gateway: &Gateway, artist_id: u64) -> Result<Artist, ApiError> {
    gateway.get_json("user/artist/", &[("id", artist_id)]).await
}

pub async fn login(
    gateway: &Gateway,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    gateway
        .post_json(
            "user/login/",
            &[("username", username), ("password", password)],
        )
        .await
}

pub async fn register(
    gateway: &Gateway,
    name: &str,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    gateway
        .post_json(
            "user/register/",
            &[("name", name), ("username", username), ("password", password)],
        )
        .await
}
