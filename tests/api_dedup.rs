//! Duplicate suppression through the pending-request registry.

mod common;

use common::*;
use serde_json::json;
use std::time::Duration;
use vendorhub::api::RequestOptions;

#[tokio::test]
async fn second_identical_request_cancels_the_first() {
    let backend = MockBackend::start().await;
    backend
        .set_fallback(MockResponse::json(r#"[{"id": 1, "name": "Acme"}]"#).with_delay(200))
        .await;
    let (client, _) = client_for(&backend, None);

    let first = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .get("/vendors", None, RequestOptions::default())
                .await
        })
    };
    assert!(
        wait_until(Duration::from_secs(1), || client.pending_requests().len() == 1).await,
        "first request should register"
    );

    let second = client
        .get("/vendors", None, RequestOptions::default())
        .await;
    let first = first.await.unwrap();

    assert!(second.is_ok());
    let err = first.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.to_string(), "Request cancelled: Duplicate request cancelled");
    assert!(client.pending_requests().is_empty());
}

#[tokio::test]
async fn settled_request_leaves_no_entry() {
    let backend = MockBackend::start().await;
    let (client, _) = client_for(&backend, None);

    client
        .get("/vendors", Some(json!({"page": 1})), RequestOptions::default())
        .await
        .unwrap();
    assert!(client.pending_requests().is_empty());

    backend.enqueue_response(MockResponse::detail(500, "boom")).await;
    let err = client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.detail(), Some("boom"));
    assert!(client.pending_requests().is_empty());
}

#[tokio::test]
async fn different_bodies_do_not_collide() {
    let backend = MockBackend::start().await;
    backend
        .set_fallback(MockResponse::json(r#"{"ok": true}"#).with_delay(100))
        .await;
    let (client, _) = client_for(&backend, None);

    let (a, b) = tokio::join!(
        client.post("/vendors", Some(json!({"name": "Acme"})), RequestOptions::default()),
        client.post("/vendors", Some(json!({"name": "Globex"})), RequestOptions::default()),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(backend.captured_requests().await.len(), 2);
}

#[tokio::test]
async fn different_params_do_not_collide() {
    let backend = MockBackend::start().await;
    backend
        .set_fallback(MockResponse::json("[]").with_delay(100))
        .await;
    let (client, _) = client_for(&backend, None);

    let (a, b) = tokio::join!(
        client.get("/vendors", Some(json!({"page": 1})), RequestOptions::default()),
        client.get("/vendors", Some(json!({"page": 2})), RequestOptions::default()),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    let mut queries: Vec<_> = backend
        .captured_requests()
        .await
        .into_iter()
        .filter_map(|r| r.query)
        .collect();
    queries.sort();
    assert_eq!(queries, vec!["page=1", "page=2"]);
}
