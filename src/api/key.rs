//! Request signature used to detect duplicate in-flight requests.

use reqwest::Method;
use serde_json::Value;

/// Build the registry key for a request.
///
/// Format: `{method}:{url}:{params}:{body}` with a lowercase method and the
/// params/body serialized as compact JSON with object keys sorted, so param
/// order never matters. Missing params or body serialize as `{}` so "no
/// params" and "empty params" collide.
pub fn request_key(method: &Method, url: &str, params: Option<&Value>, body: Option<&Value>) -> String {
    format!(
        "{}:{}:{}:{}",
        method.as_str().to_ascii_lowercase(),
        url,
        serialize_or_empty(params),
        serialize_or_empty(body)
    )
}

fn serialize_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "{}".to_string(),
    }
}
