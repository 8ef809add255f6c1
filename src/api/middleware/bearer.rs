use crate::api::error::ApiError;
use crate::api::pipeline::Middleware;
use crate::api::request::ApiRequest;
use crate::api::session::SessionStore;

/// Adds `Authorization: Bearer <token>` while a session token is held.
#[derive(Debug, Clone)]
pub struct BearerToken {
    session: SessionStore,
}

impl BearerToken {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl Middleware for BearerToken {
    fn name(&self) -> &'static str {
        "bearer_token"
    }

    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if let Some(token) = self.session.token() {
            request.set_header("authorization", format!("Bearer {}", token));
        }
        Ok(())
    }
}
