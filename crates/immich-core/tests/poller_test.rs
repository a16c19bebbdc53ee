#![allow(clippy::unwrap_used)]
// Integration tests for the background refresh task.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use immich_api::{Credentials, ImmichClient, TransportConfig};
use immich_core::{ReadingRegistry, ReadingState, spawn_poller};

async fn registry_for(server: &MockServer) -> Arc<ReadingRegistry> {
    Mock::given(method("GET"))
        .and(path("/api/people"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "people": [], "total": 0, "hidden": 0
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/assets/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": 120, "videos": 8, "total": 130
        })))
        .mount(server)
        .await;

    let creds = Credentials::new(&server.uri(), SecretString::from("k".to_string())).unwrap();
    let client = ImmichClient::new(&creds, &TransportConfig::default()).unwrap();
    Arc::new(ReadingRegistry::discover(Arc::new(client)).await)
}

#[tokio::test]
async fn test_zero_period_runs_one_tick() {
    let server = MockServer::start().await;
    let registry = registry_for(&server).await;

    let handle = spawn_poller(
        Arc::clone(&registry),
        Duration::ZERO,
        CancellationToken::new(),
    );
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        registry.get("total_assets").unwrap().state,
        ReadingState::Fresh(130)
    );
    assert!(registry.last_refresh().is_some());
}

#[tokio::test]
async fn test_first_tick_is_immediate_and_cancel_stops_loop() {
    let server = MockServer::start().await;
    let registry = registry_for(&server).await;
    let mut ticks = registry.subscribe_ticks();
    let cancel = CancellationToken::new();

    let handle = spawn_poller(
        Arc::clone(&registry),
        Duration::from_secs(3600),
        cancel.clone(),
    );

    tokio::time::timeout(Duration::from_secs(5), ticks.changed())
        .await
        .unwrap()
        .unwrap();

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    assert!(ticks.borrow().is_some());
    assert!(
        registry
            .snapshot()
            .iter()
            .all(|r| matches!(r.state, ReadingState::Fresh(_)))
    );
}

#[tokio::test]
async fn test_cancelled_before_start_runs_no_tick() {
    let server = MockServer::start().await;
    let registry = registry_for(&server).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let handle = spawn_poller(Arc::clone(&registry), Duration::from_secs(60), cancel);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    assert!(registry.last_refresh().is_none());
}
