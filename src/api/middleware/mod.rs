//! Built-in pipeline stages, in their default order.

mod auth;
mod bearer;
mod dedup;
mod headers;

pub use auth::{classify, is_token_revoked, AuthDecision, AuthFailurePolicy};
pub use bearer::BearerToken;
pub use dedup::{Deduplicate, DUPLICATE_REASON};
pub use headers::DefaultHeaders;
