//! Session-expiry handling for 401 responses.
//!
//! | condition                                   | outcome                     |
//! |---------------------------------------------|-----------------------------|
//! | not a 401                                   | pass through                |
//! | request has `skip_auth_handling`            | pass through                |
//! | 401 with revoked/blacklisted/invalid token  | logout, retry flag untouched|
//! | 401, not retried                            | mark retried, logout        |
//! | 401, already retried                        | pass through                |
//!
//! The error is always returned to the caller; "logout" means clearing the
//! local session and emitting [`SessionEvent::Expired`].

use reqwest::StatusCode;

use crate::api::error::ApiError;
use crate::api::pipeline::Middleware;
use crate::api::request::ApiRequest;
use crate::api::session::{LogoutReason, SessionEvent, SessionEvents, SessionStore};

const REVOCATION_MARKERS: [&str; 3] = ["Token has been revoked", "blacklist", "invalid token"];

/// True when a 401 detail says the server invalidated the token.
pub fn is_token_revoked(detail: &str) -> bool {
    REVOCATION_MARKERS
        .iter()
        .any(|marker| detail.contains(marker))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    PassThrough,
    Skipped,
    RevokedLogout,
    UnauthorizedLogout,
    AlreadyRetried,
}

impl AuthDecision {
    pub fn logs_out(self) -> bool {
        matches!(self, AuthDecision::RevokedLogout | AuthDecision::UnauthorizedLogout)
    }
}

/// Decide what a failed request means for the session. Pure.
pub fn classify(request: &ApiRequest, error: &ApiError) -> AuthDecision {
    if request.skip_auth_handling {
        return AuthDecision::Skipped;
    }
    if error.status() != Some(StatusCode::UNAUTHORIZED) {
        return AuthDecision::PassThrough;
    }
    if error.detail().is_some_and(is_token_revoked) {
        return AuthDecision::RevokedLogout;
    }
    if request.retried {
        AuthDecision::AlreadyRetried
    } else {
        AuthDecision::UnauthorizedLogout
    }
}

#[derive(Debug, Clone)]
pub struct AuthFailurePolicy {
    session: SessionStore,
    events: SessionEvents,
}

impl AuthFailurePolicy {
    pub fn new(session: SessionStore, events: SessionEvents) -> Self {
        Self { session, events }
    }

    /// Classify the failure and apply its side effects.
    pub fn evaluate(&self, request: &mut ApiRequest, error: &ApiError) -> AuthDecision {
        let decision = classify(request, error);
        match decision {
            AuthDecision::RevokedLogout => {
                tracing::info!(
                    id = %request.id,
                    url = %request.url,
                    "Token was invalidated by server, performing immediate logout"
                );
                self.logout(LogoutReason::TokenRevoked);
            }
            AuthDecision::UnauthorizedLogout => {
                request.retried = true;
                tracing::info!(
                    id = %request.id,
                    url = %request.url,
                    "Unauthorized response, ending session"
                );
                self.logout(LogoutReason::Unauthorized);
            }
            AuthDecision::AlreadyRetried => {
                tracing::debug!(id = %request.id, "401 on retried request, passing through");
            }
            AuthDecision::PassThrough | AuthDecision::Skipped => {}
        }
        decision
    }

    fn logout(&self, reason: LogoutReason) {
        self.session.clear();
        self.events.emit(&SessionEvent::expired(reason));
    }
}

impl Middleware for AuthFailurePolicy {
    fn name(&self) -> &'static str {
        "auth_failure_policy"
    }

    fn on_error(&self, request: &mut ApiRequest, error: &ApiError) {
        self.evaluate(request, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use reqwest::Method;
    use std::sync::Arc;

    fn unauthorized(detail: &str) -> ApiError {
        ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({ "detail": detail }).to_string().as_bytes(),
        )
    }

    fn policy() -> (AuthFailurePolicy, SessionStore, Arc<Mutex<Vec<SessionEvent>>>) {
        let session = SessionStore::new(Some("token".into()));
        let events = SessionEvents::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            events.subscribe(move |event| seen.lock().push(event.clone()));
        }
        (AuthFailurePolicy::new(session.clone(), events), session, seen)
    }

    #[test]
    fn revocation_markers_match() {
        assert!(is_token_revoked("Token has been revoked"));
        assert!(is_token_revoked("token is in blacklist"));
        assert!(is_token_revoked("invalid token supplied"));
        assert!(!is_token_revoked("Not authenticated"));
        assert!(!is_token_revoked("Blacklist"));
    }

    #[test]
    fn non_401_passes_through() {
        let (policy, session, seen) = policy();
        let mut request = ApiRequest::new(Method::GET, "/vendors");
        let err = ApiError::from_status(StatusCode::FORBIDDEN, b"{}");

        assert_eq!(policy.evaluate(&mut request, &err), AuthDecision::PassThrough);
        assert!(session.is_authenticated());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn cancellation_passes_through() {
        let request = ApiRequest::new(Method::GET, "/vendors");
        let err = ApiError::Cancelled {
            reason: "Duplicate request cancelled".into(),
        };
        assert_eq!(classify(&request, &err), AuthDecision::PassThrough);
    }

    #[test]
    fn revoked_token_logs_out_without_retry_flag() {
        let (policy, session, seen) = policy();
        let mut request = ApiRequest::new(Method::GET, "/vendors");

        let decision = policy.evaluate(&mut request, &unauthorized("Token is blacklisted"));

        assert_eq!(decision, AuthDecision::RevokedLogout);
        assert!(!request.retried);
        assert!(!session.is_authenticated());
        assert_eq!(
            *seen.lock(),
            vec![SessionEvent::Expired {
                reason: LogoutReason::TokenRevoked,
                redirect: "/login?reason=session_expired".into(),
            }]
        );
    }

    #[test]
    fn revoked_token_logs_out_even_when_retried() {
        let (policy, _, seen) = policy();
        let mut request = ApiRequest::new(Method::GET, "/vendors");
        request.retried = true;

        let decision = policy.evaluate(&mut request, &unauthorized("invalid token"));

        assert_eq!(decision, AuthDecision::RevokedLogout);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn first_unauthorized_sets_retry_flag_and_logs_out() {
        let (policy, session, seen) = policy();
        let mut request = ApiRequest::new(Method::GET, "/vendors");

        let decision = policy.evaluate(&mut request, &unauthorized("Not authenticated"));

        assert_eq!(decision, AuthDecision::UnauthorizedLogout);
        assert!(decision.logs_out());
        assert!(request.retried);
        assert!(!session.is_authenticated());
        assert_eq!(
            *seen.lock(),
            vec![SessionEvent::expired(LogoutReason::Unauthorized)]
        );
    }

    #[test]
    fn retried_unauthorized_does_nothing() {
        let (policy, session, seen) = policy();
        let mut request = ApiRequest::new(Method::GET, "/vendors");
        request.retried = true;

        let decision = policy.evaluate(&mut request, &unauthorized("Not authenticated"));

        assert_eq!(decision, AuthDecision::AlreadyRetried);
        assert!(!decision.logs_out());
        assert!(session.is_authenticated());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn skip_flag_bypasses_policy() {
        let (policy, session, seen) = policy();
        let mut request = ApiRequest::new(Method::POST, "/auth/login");
        request.skip_auth_handling = true;

        let decision = policy.evaluate(&mut request, &unauthorized("Token has been revoked"));

        assert_eq!(decision, AuthDecision::Skipped);
        assert!(!request.retried);
        assert!(session.is_authenticated());
        assert!(seen.lock().is_empty());
    }
}
