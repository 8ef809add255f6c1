use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::api::cancel::CancelHandle;
use crate::api::error::ApiError;
use crate::api::key::request_key;

/// A request travelling through the pipeline.
///
/// Header names are stored lowercase. `retried` is only ever set by the auth
/// policy; no second attempt is issued for it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub id: Uuid,
    pub method: Method,
    pub url: String,
    pub params: Option<Value>,
    pub body: Option<Value>,
    pub headers: BTreeMap<String, String>,
    pub skip_auth_handling: bool,
    pub retried: bool,
    pub cancel: Option<CancelHandle>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            url: url.into(),
            params: None,
            body: None,
            headers: BTreeMap::new(),
            skip_auth_handling: false,
            retried: false,
            cancel: None,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Registry key for duplicate detection.
    pub fn key(&self) -> String {
        request_key(
            &self.method,
            &self.url,
            self.params.as_ref(),
            self.body.as_ref(),
        )
    }

    /// Apply caller options on top of the request.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.skip_auth_handling = options.skip_auth_handling;
        for (name, value) in options.headers {
            self.set_header(&name, value);
        }
        if options.cancel.is_some() {
            self.cancel = options.cancel;
        }
        self
    }
}

/// Per-call options for [`ApiClient`](crate::api::ApiClient) helpers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Let a 401 through without triggering session expiry.
    pub skip_auth_handling: bool,
    pub headers: Vec<(String, String)>,
    /// Caller-owned handle from `create_cancellation_token`.
    pub cancel: Option<CancelHandle>,
}

impl RequestOptions {
    pub fn skip_auth_handling(mut self) -> Self {
        self.skip_auth_handling = true;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn cancel_with(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }
}

/// A settled, successful response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(ApiError::Decode)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
