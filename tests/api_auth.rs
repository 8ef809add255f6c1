//! 401 handling: session expiry events, revocation and opt-outs.

mod common;

use common::*;
use reqwest::{Method, StatusCode};
use vendorhub::api::{
    ApiRequest, LogoutReason, RequestOptions, SessionEvent, SESSION_EXPIRED_REDIRECT,
};

#[tokio::test]
async fn revoked_token_expires_session() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(401, "Token is on the blacklist"))
        .await;
    let (client, events) = client_for(&backend, Some("abc"));

    let err = client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(!client.session().is_authenticated());
    assert_eq!(
        events.lock().as_slice(),
        &[SessionEvent::Expired {
            reason: LogoutReason::TokenRevoked,
            redirect: SESSION_EXPIRED_REDIRECT.to_string(),
        }]
    );
}

#[tokio::test]
async fn plain_unauthorized_expires_session_once() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(401, "Authentication required"))
        .await;
    let (client, events) = client_for(&backend, Some("abc"));

    let err = client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.detail(), Some("Authentication required"));
    assert_eq!(
        events.lock().as_slice(),
        &[SessionEvent::expired(LogoutReason::Unauthorized)]
    );
    // No second attempt is sent.
    assert_eq!(backend.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn retried_request_passes_401_through() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(401, "Authentication required"))
        .await;
    let (client, events) = client_for(&backend, Some("abc"));

    let mut request = ApiRequest::new(Method::GET, "/vendors");
    request.retried = true;
    let err = client.send(request).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(events.lock().is_empty());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn revocation_wins_over_retried_flag() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(401, "invalid token"))
        .await;
    let (client, events) = client_for(&backend, Some("abc"));

    let mut request = ApiRequest::new(Method::GET, "/vendors");
    request.retried = true;
    client.send(request).await.unwrap_err();

    assert_eq!(
        events.lock().as_slice(),
        &[SessionEvent::expired(LogoutReason::TokenRevoked)]
    );
}

#[tokio::test]
async fn skip_auth_handling_returns_401_silently() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(401, "Token has been revoked"))
        .await;
    let (client, events) = client_for(&backend, Some("abc"));

    let err = client
        .post("/auth/login", None, RequestOptions::default().skip_auth_handling())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(events.lock().is_empty());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn server_errors_do_not_touch_session() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(500, "invalid token"))
        .await;
    let (client, events) = client_for(&backend, Some("abc"));

    let err = client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(events.lock().is_empty());
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let backend = MockBackend::start().await;
    let (client, _) = client_for(&backend, Some("abc"));

    client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap();

    let captured = backend.captured_requests().await;
    assert_eq!(captured[0].header("authorization"), Some("Bearer abc"));
}

#[tokio::test]
async fn no_token_sends_no_authorization() {
    let backend = MockBackend::start().await;
    let (client, _) = client_for(&backend, None);

    client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap();

    let captured = backend.captured_requests().await;
    assert_eq!(captured[0].header("authorization"), None);
}

#[tokio::test]
async fn token_set_after_expiry_is_used_by_next_request() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::detail(401, "Token has been revoked"))
        .await;
    let (client, events) = client_for(&backend, Some("stale"));

    client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap_err();
    assert!(!client.session().is_authenticated());
    assert_eq!(events.lock().len(), 1);

    client.session().set_token("renewed");
    client
        .get("/vendors", None, RequestOptions::default())
        .await
        .unwrap();

    let captured = backend.captured_requests().await;
    assert_eq!(captured[0].header("authorization"), Some("Bearer stale"));
    assert_eq!(captured[1].header("authorization"), Some("Bearer renewed"));
    assert_eq!(events.lock().len(), 1);
}
