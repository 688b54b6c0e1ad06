mod common;

use common::{client, token_expiring_in, MockBackend};
use slaymusic::api;
use slaymusic::models::TrackQuery;
use slaymusic::ApiError;

fn empty_tracks(_: &common::Recorded) -> (u16, String) {
    (200, "[]".to_string())
}

#[tokio::test]
async fn bearer_header_attached_to_every_request() {
    let backend = MockBackend::start(empty_tracks);
    let token = token_expiring_in(5, 600);
    let client = client(&backend, Some(&token));

    api::tracks::fetch_tracks(client.gateway(), &TrackQuery::default())
        .await
        .unwrap();
    api::playlists::fetch_playlists_by_author(client.gateway(), 5)
        .await
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.authorization, Some(format!("Bearer {}", token)));
    }
}

#[tokio::test]
async fn no_header_without_credential() {
    let backend = MockBackend::start(empty_tracks);
    let client = client(&backend, None);

    let tracks = api::tracks::fetch_tracks(client.gateway(), &TrackQuery::artist(2))
        .await
        .unwrap();
    assert!(tracks.is_empty());

    let requests = backend.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[0].param("artist_id"), Some("2"));
}

#[tokio::test]
async fn expired_credential_is_still_sent() {
    let backend = MockBackend::start(empty_tracks);
    let expired = token_expiring_in(5, -60);
    let client = client(&backend, Some(&expired));

    api::tracks::fetch_tracks(client.gateway(), &TrackQuery::default())
        .await
        .unwrap();
    assert_eq!(
        backend.requests()[0].authorization,
        Some(format!("Bearer {}", expired))
    );
}

#[tokio::test]
async fn unauthorized_evicts_credential_and_redirects() {
    let backend = MockBackend::start(|_| {
        (
            401,
            r#"{"detail":"Could not validate credentials"}"#.to_string(),
        )
    });
    let token = token_expiring_in(5, 600);
    let client = client(&backend, Some(&token));

    assert_eq!(client.navigator().navigate("/liked").unwrap().path, "/liked");

    let err = api::tracks::fetch_tracks(client.gateway(), &TrackQuery::playlist(3))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));

    assert_eq!(client.auth().raw_token(), None);
    assert_eq!(client.navigator().current_path().as_deref(), Some("/login"));
    assert_eq!(
        client.navigator().history(),
        vec!["/liked".to_string(), "/login".to_string()]
    );
}

#[tokio::test]
async fn other_failures_keep_credential() {
    let backend = MockBackend::start(|_| (500, r#"{"detail":"boom"}"#.to_string()));
    let token = token_expiring_in(5, 600);
    let client = client(&backend, Some(&token));

    let err = api::users::fetch_artist(client.gateway(), 1).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(client.auth().raw_token(), Some(token));
    assert_eq!(client.navigator().current_path(), None);
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let backend = MockBackend::start(|_| (200, "not json".to_string()));
    let client = client(&backend, None);

    let err = api::tracks::fetch_tracks(client.gateway(), &TrackQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}
