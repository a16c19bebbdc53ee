#![allow(clippy::unwrap_used)]
// Integration tests for `ImmichClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use immich_api::{AssetStatistics, Credentials, Error, ErrorKind, ImmichClient, TransportConfig};

const API_KEY: &str = "test-api-key";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ImmichClient) {
    let server = MockServer::start().await;
    let client = client_for(&server.uri());
    (server, client)
}

fn client_for(host: &str) -> ImmichClient {
    let creds = Credentials::new(host, SecretString::from(API_KEY.to_string())).unwrap();
    ImmichClient::new(&creds, &TransportConfig::default()).unwrap()
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_sends_key_and_accept_headers() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateToken"))
        .and(header("x-api-key", API_KEY))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authStatus": true })))
        .expect(2)
        .mount(&server)
        .await;

    assert!(client.authenticate().await.unwrap());
    assert!(client.authenticate().await.unwrap());
}

#[tokio::test]
async fn test_authenticate_false_is_not_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authStatus": false })))
        .mount(&server)
        .await;

    assert!(!client.authenticate().await.unwrap());
}

#[tokio::test]
async fn test_authenticate_missing_status_reads_false() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(!client.authenticate().await.unwrap());
}

#[tokio::test]
async fn test_authenticate_rejected_key_reads_false() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateToken"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid API key",
            "statusCode": 401
        })))
        .mount(&server)
        .await;

    assert!(!client.authenticate().await.unwrap());
}

#[tokio::test]
async fn test_authenticate_forbidden_reads_false() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateToken"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    assert!(!client.authenticate().await.unwrap());
}

#[tokio::test]
async fn test_authenticate_server_error_still_fails() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/validateToken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.authenticate().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_get_my_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "jane@example.com",
            "name": "Jane",
            "isAdmin": true
        })))
        .mount(&server)
        .await;

    let user = client.get_my_user().await.unwrap();
    assert_eq!(user.name, "Jane");
    assert_eq!(user.email, "jane@example.com");
    assert_eq!(user.extra["isAdmin"], true);
}

// ── Statistics ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_asset_statistics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": 120,
            "videos": 8,
            "total": 130
        })))
        .mount(&server)
        .await;

    let stats = client.get_asset_statistics().await.unwrap();
    assert_eq!(
        stats,
        AssetStatistics {
            images: 120,
            videos: 8,
            total: 130
        }
    );
}

#[tokio::test]
async fn test_favorite_statistics_uses_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/statistics"))
        .and(query_param("isFavorite", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": 3,
            "videos": 1,
            "total": 4
        })))
        .mount(&server)
        .await;

    let stats = client.get_favorite_statistics().await.unwrap();
    assert_eq!(stats.total, 4);
}

#[tokio::test]
async fn test_people_and_person_statistics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/people"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "people": [
                { "id": "p1", "name": "Jane Doe", "isHidden": false },
                { "id": "p2", "name": "", "isHidden": true }
            ],
            "total": 2,
            "hidden": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/people/p1/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assets": 42 })))
        .mount(&server)
        .await;

    let people = client.get_people().await.unwrap();
    assert_eq!(people.total, 2);
    assert_eq!(people.hidden, 1);
    assert_eq!(people.people.len(), 2);
    assert!(people.people[1].is_hidden);

    let stats = client.get_person_statistics("p1").await.unwrap();
    assert_eq!(stats.assets, 42);
}

// ── Albums & search ─────────────────────────────────────────────────

#[tokio::test]
async fn test_list_albums() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a1", "albumName": "Holidays", "assetCount": 12, "shared": false },
            { "id": "a2", "albumName": "Pets", "assetCount": 3 }
        ])))
        .mount(&server)
        .await;

    let albums = client.list_albums().await.unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].album_name, "Holidays");
    assert_eq!(albums[0].asset_count, 12);
    assert_eq!(albums[1].id, "a2");
}

#[tokio::test]
async fn test_list_album_images_filters_videos() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1",
            "albumName": "Holidays",
            "assets": [
                { "id": "x1", "type": "IMAGE" },
                { "id": "x2", "type": "VIDEO" },
                { "id": "x3", "type": "IMAGE" }
            ]
        })))
        .mount(&server)
        .await;

    let images = client.list_album_images("a1").await.unwrap();
    let ids: Vec<&str> = images.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["x1", "x3"]);
}

#[tokio::test]
async fn test_album_without_assets_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/albums/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a1" })))
        .mount(&server)
        .await;

    let err = client.list_album_images("a1").await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Api);
}

#[tokio::test]
async fn test_list_favorite_images_posts_search_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/search/metadata"))
        .and(body_json(json!({ "isFavorite": "true" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assets": {
                "total": 2,
                "items": [
                    { "id": "f1", "type": "IMAGE" },
                    { "id": "f2", "type": "VIDEO" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let favorites = client.list_favorite_images().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, "f1");
}

#[tokio::test]
async fn test_get_asset_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/x1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "x1",
            "type": "IMAGE",
            "originalFileName": "IMG_0001.jpg"
        })))
        .mount(&server)
        .await;

    let asset = client.get_asset_info("x1").await.unwrap();
    assert!(asset.is_image());
    assert_eq!(asset.extra["originalFileName"], "IMG_0001.jpg");
}

// ── Download ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_download_jpeg() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/x1/original"))
        .and(header("x-api-key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF]),
        )
        .mount(&server)
        .await;

    let bytes = client.download_asset("x1").await.unwrap().unwrap();
    assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn test_download_pdf_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/doc/original"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7".to_vec()),
        )
        .mount(&server)
        .await;

    assert!(client.download_asset("doc").await.unwrap().is_none());
}

#[tokio::test]
async fn test_download_not_found_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/gone/original"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    assert!(client.download_asset("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_download_id_cannot_escape_asset_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me/original"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"SECRET".to_vec()),
        )
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/assets/..%2Fusers%2Fme/original"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.download_asset("../users/me").await.unwrap().is_none());
}

#[tokio::test]
async fn test_asset_id_with_query_characters_stays_in_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/x%3Fy%23z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "x?y#z",
            "type": "IMAGE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let asset = client.get_asset_info("x?y#z").await.unwrap();
    assert_eq!(asset.id, "x?y#z");
}

#[tokio::test]
async fn test_dot_segment_id_is_rejected_without_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.get_album("..").await.unwrap_err();
    assert!(matches!(err, Error::InvalidId { ref id } if id == ".."), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Api);
}

// ── Error taxonomy ──────────────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_is_api_error_with_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    let results = [
        client.get_asset_statistics().await.map(|_| ()),
        client.get_favorite_statistics().await.map(|_| ()),
        client.get_people().await.map(|_| ()),
        client.get_person_statistics("p1").await.map(|_| ()),
        client.list_albums().await.map(|_| ()),
        client.list_album_images("a1").await.map(|_| ()),
        client.get_my_user().await.map(|_| ()),
    ];

    for result in results {
        match result {
            Err(Error::Api { status, ref body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal failure");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/people"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = client.get_people().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { ref body, .. } if body.contains("proxy")));
}

#[tokio::test]
async fn test_connection_refused_is_cannot_connect() {
    // Bind then drop a server so the port is known to be closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = client_for(&uri);

    let err = client.get_asset_statistics().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CannotConnect);

    let err = client.download_asset("x1").await.unwrap_err();
    assert!(matches!(err, Error::CannotConnect { .. }));
}

#[tokio::test]
async fn test_timeout_is_cannot_connect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/assets/statistics"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "images": 1 }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let creds = Credentials::new(&server.uri(), SecretString::from(API_KEY.to_string())).unwrap();
    let transport = TransportConfig::default().with_timeout(Duration::from_millis(200));
    let client = ImmichClient::new(&creds, &transport).unwrap();

    let err = client.get_asset_statistics().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CannotConnect);
    assert!(err.is_timeout());
}
