use crate::api::error::ApiError;
use crate::api::pipeline::Middleware;
use crate::api::request::ApiRequest;
use crate::config::Environment;

const JSON: &str = "application/json";

/// Attaches the JSON content headers and, outside development, the
/// application's `Origin`.
///
/// Headers already present on the request are left alone.
#[derive(Debug, Clone)]
pub struct DefaultHeaders {
    environment: Environment,
    origin: Option<String>,
}

impl DefaultHeaders {
    pub fn new(environment: Environment, origin: Option<String>) -> Self {
        Self {
            environment,
            origin: origin.filter(|o| !o.is_empty()),
        }
    }
}

impl Middleware for DefaultHeaders {
    fn name(&self) -> &'static str {
        "default_headers"
    }

    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        for name in ["content-type", "accept"] {
            request
                .headers
                .entry(name.to_string())
                .or_insert_with(|| JSON.to_string());
        }

        if !self.environment.is_development() {
            if let Some(origin) = &self.origin {
                request.set_header("origin", origin.clone());
            }
        }
        Ok(())
    }
}
