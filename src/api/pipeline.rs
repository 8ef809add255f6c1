//! Ordered request/response middleware.
//!
//! ```text
//! on_request ─→ transport ─┬─→ on_response   (2xx)
//!                          ├─→ on_error      (status / transport failure)
//!                          └─→ on_cancelled  (superseded or cancelled)
//! ```
//!
//! Stages run in registration order for every hook.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::request::{ApiRequest, ApiResponse};

/// One stage of the HTTP pipeline.
///
/// Every hook defaults to a no-op so a stage only implements what it needs.
pub trait Middleware: Send + Sync {
    /// Name used in logs and rejection errors.
    fn name(&self) -> &'static str;

    /// Inspect or rewrite the request before it is sent.
    ///
    /// Returning an error aborts the request. Every stage then gets
    /// `on_error` with that error, including stages that never saw the request.
    fn on_request(&self, _request: &mut ApiRequest) -> Result<(), ApiError> {
        Ok(())
    }

    fn on_response(&self, _request: &ApiRequest, _response: &ApiResponse) {}

    /// Called for every failure except cancellation.
    fn on_error(&self, _request: &mut ApiRequest, _error: &ApiError) {}

    fn on_cancelled(&self, _request: &ApiRequest) {}
}

#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<M: Middleware + 'static>(mut self, stage: M) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn push(&mut self, stage: Arc<dyn Middleware>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn run_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        for stage in &self.stages {
            stage.on_request(request)?;
        }
        Ok(())
    }

    pub fn run_response(&self, request: &ApiRequest, response: &ApiResponse) {
        for stage in &self.stages {
            stage.on_response(request, response);
        }
    }

    pub fn run_error(&self, request: &mut ApiRequest, error: &ApiError) {
        for stage in &self.stages {
            stage.on_error(request, error);
        }
    }

    pub fn run_cancelled(&self, request: &ApiRequest) {
        for stage in &self.stages {
            stage.on_cancelled(request);
        }
    }
}
