//! HTTP client wrapper for the vendor backend.
//!
//! [`ApiClient`] sends every request through an ordered [`Pipeline`]:
//!
//! ```text
//! DefaultHeaders → BearerToken → Deduplicate → AuthFailurePolicy
//! ```
//!
//! - identical in-flight requests (method, URL, params, body) are collapsed:
//!   the newest one wins and the older one fails with [`ApiError::Cancelled`]
//! - a 401 ends the local session and emits [`SessionEvent::Expired`]
//! - the pending-request registry is owned by the client instance

mod cancel;
mod client;
mod error;
mod key;
pub mod middleware;
mod pipeline;
mod registry;
mod request;
mod session;

pub use cancel::{CancelHandle, USER_CANCEL_REASON};
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use key::request_key;
pub use pipeline::{Middleware, Pipeline};
pub use registry::PendingRequests;
pub use request::{ApiRequest, ApiResponse, RequestOptions};
pub use session::{
    LogoutReason, SessionEvent, SessionEvents, SessionListener, SessionStore,
    SESSION_EXPIRED_REDIRECT,
};
