use regex::Regex;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::cancel::CancelHandle;
use crate::api::error::ApiError;
use crate::api::middleware::{AuthFailurePolicy, BearerToken, Deduplicate, DefaultHeaders};
use crate::api::pipeline::{Middleware, Pipeline};
use crate::api::registry::PendingRequests;
use crate::api::request::{ApiRequest, ApiResponse, RequestOptions};
use crate::api::session::{SessionEvents, SessionStore};
use crate::config::{ApiConfig, Environment};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const CANCEL_ALL_REASON: &str = "Cancelled by user";
const CANCEL_PATTERN_REASON: &str = "Cancelled by pattern match";

/// HTTP client wrapper with duplicate suppression and session-expiry handling.
///
/// Cloning is cheap; clones share the transport, the pending-request registry
/// and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    pipeline: Pipeline,
    pending: PendingRequests,
    session: SessionStore,
    events: SessionEvents,
}

pub struct ApiClientBuilder {
    base_url: String,
    environment: Environment,
    origin: Option<String>,
    session: SessionStore,
    events: SessionEvents,
    extra_stages: Vec<Arc<dyn Middleware>>,
}

impl ApiClientBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn session_events(mut self, events: SessionEvents) -> Self {
        self.events = events;
        self
    }

    /// Append a stage after the built-in ones.
    pub fn stage<M: Middleware + 'static>(mut self, stage: M) -> Self {
        self.extra_stages.push(Arc::new(stage));
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = parse_base_url(&self.base_url)?;
        let http = Client::builder().build().map_err(ApiError::Client)?;
        let pending = PendingRequests::new();

        let mut pipeline = Pipeline::new()
            .with(DefaultHeaders::new(self.environment, self.origin))
            .with(BearerToken::new(self.session.clone()))
            .with(Deduplicate::new(pending.clone()))
            .with(AuthFailurePolicy::new(
                self.session.clone(),
                self.events.clone(),
            ));
        for stage in self.extra_stages {
            pipeline.push(stage);
        }

        Ok(ApiClient {
            http,
            base_url,
            pipeline,
            pending,
            session: self.session,
            events: self.events,
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            environment: Environment::default(),
            origin: None,
            session: SessionStore::default(),
            events: SessionEvents::default(),
            extra_stages: Vec::new(),
        }
    }

    /// Build a client from the `[api]` config section.
    ///
    /// The initial session token is read from the environment variable named
    /// by `token_env_var`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let token = std::env::var(&config.token_env_var).ok();
        let mut builder = Self::builder(config.base_url.clone())
            .environment(config.environment)
            .session(SessionStore::new(token));
        if let Some(origin) = &config.origin {
            builder = builder.origin(origin.clone());
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pending_requests(&self) -> &PendingRequests {
        &self.pending
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_events(&self) -> &SessionEvents {
        &self.events
    }

    pub async fn get(
        &self,
        url: &str,
        params: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(Method::GET, url);
        request.params = params;
        self.send(request.with_options(options)).await
    }

    /// `get` and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<Value>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.get(url, params, options).await?.json()
    }

    pub async fn post(
        &self,
        url: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(Method::POST, url);
        request.body = body;
        self.send(request.with_options(options)).await
    }

    pub async fn put(
        &self,
        url: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(Method::PUT, url);
        request.body = body;
        self.send(request.with_options(options)).await
    }

    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::new(Method::DELETE, url).with_options(options))
            .await
    }

    /// Run `request` through the pipeline and the transport.
    ///
    /// Errors are never swallowed: stages only observe them.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Err(err) = self.pipeline.run_request(&mut request) {
            self.pipeline.run_error(&mut request, &err);
            return Err(err);
        }

        let handle = request.cancel.clone().unwrap_or_default();
        // Releases the entry however `send` ends, including when the caller
        // drops this future mid-flight.
        let settle_key = request.key();
        let _settle = scopeguard::guard(handle.clone(), |handle| {
            if self.pending.settle(&settle_key, &handle) {
                tracing::trace!(key = %settle_key, "Released abandoned request");
            }
        });
        tracing::debug!(
            id = %request.id,
            method = %request.method,
            url = %request.url,
            "Sending request"
        );

        let outcome = if handle.is_cancelled() {
            Err(cancelled(&handle))
        } else {
            tokio::select! {
                biased;
                _ = handle.cancelled() => Err(cancelled(&handle)),
                result = self.dispatch(&request) => result,
            }
        };

        match outcome {
            Ok(response) => {
                self.pipeline.run_response(&request, &response);
                Ok(response)
            }
            Err(err) if err.is_cancelled() => {
                tracing::debug!(id = %request.id, reason = %err, "Request cancelled");
                self.pipeline.run_cancelled(&request);
                Err(err)
            }
            Err(err) => {
                tracing::debug!(id = %request.id, error = %err, "Request failed");
                self.pipeline.run_error(&mut request, &err);
                Err(err)
            }
        }
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.resolve_url(&request.url, request.params.as_ref())?;
        let mut builder = self.http.request(request.method.clone(), url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        if status.is_success() {
            Ok(ApiResponse {
                status,
                headers,
                body,
            })
        } else {
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Join a request path onto the base URL and append query params.
    ///
    /// Absolute `http(s)` URLs bypass the base URL.
    pub fn resolve_url(&self, url: &str, params: Option<&Value>) -> Result<Url, ApiError> {
        let raw = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.as_str().trim_end_matches('/'),
                url.trim_start_matches('/')
            )
        };
        let mut resolved = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if let Some(Value::Object(params)) = params {
            append_query(&mut resolved, params);
        }
        Ok(resolved)
    }

    /// A handle to pass through `RequestOptions::cancel_with`.
    pub fn create_cancellation_token(&self) -> CancelHandle {
        CancelHandle::new()
    }

    /// Cancel every tracked request and clear the registry.
    pub fn cancel_all_requests(&self, reason: Option<&str>) -> usize {
        let count = self
            .pending
            .cancel_all(reason.unwrap_or(CANCEL_ALL_REASON));
        tracing::debug!(count, "Cancelled all pending requests");
        count
    }

    /// Cancel the tracked requests whose key matches `pattern`.
    ///
    /// Keys look like `get:/vendors:{"page":1}:{}`.
    pub fn cancel_requests_by_pattern(&self, pattern: &Regex, reason: Option<&str>) -> usize {
        let count = self
            .pending
            .cancel_matching(pattern, reason.unwrap_or(CANCEL_PATTERN_REASON));
        tracing::debug!(count, pattern = %pattern, "Cancelled pending requests by pattern");
        count
    }
}

fn cancelled(handle: &CancelHandle) -> ApiError {
    ApiError::Cancelled {
        reason: handle
            .reason()
            .unwrap_or_else(|| CANCEL_ALL_REASON.to_string()),
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn append_query(url: &mut Url, params: &serde_json::Map<String, Value>) {
    let pairs: Vec<(&str, String)> = params
        .iter()
        .flat_map(|(name, value)| match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .map(|item| (name.as_str(), query_value(item)))
                .collect(),
            other => vec![(name.as_str(), query_value(other))],
        })
        .collect();
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (name, value) in pairs {
        query.append_pair(name, &value);
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
