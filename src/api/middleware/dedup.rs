use crate::api::cancel::CancelHandle;
use crate::api::error::ApiError;
use crate::api::pipeline::Middleware;
use crate::api::registry::PendingRequests;
use crate::api::request::{ApiRequest, ApiResponse};

/// Reason given to a request replaced by an identical newer one.
pub const DUPLICATE_REASON: &str = "Duplicate request cancelled";

/// Keeps at most one live request per signature.
///
/// A new request cancels any in-flight request with the same key and takes
/// its place in the registry. Settled requests remove their own entry.
#[derive(Debug, Clone)]
pub struct Deduplicate {
    pending: PendingRequests,
}

impl Deduplicate {
    pub fn new(pending: PendingRequests) -> Self {
        Self { pending }
    }

    fn release(&self, request: &ApiRequest) {
        if let Some(handle) = &request.cancel {
            let key = request.key();
            if self.pending.settle(&key, handle) {
                tracing::trace!(key = %key, "Released pending request");
            }
        }
    }
}

impl Middleware for Deduplicate {
    fn name(&self) -> &'static str {
        "deduplicate"
    }

    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        // The registry holds a per-request handle, never the caller's token,
        // so superseding one request cannot cancel others sharing that token.
        let handle = match &request.cancel {
            Some(token) => CancelHandle::linked(token),
            None => CancelHandle::new(),
        };
        request.cancel = Some(handle.clone());
        let key = request.key();
        if self.pending.supersede(key, handle, DUPLICATE_REASON) {
            tracing::debug!(
                id = %request.id,
                method = %request.method,
                url = %request.url,
                "Duplicate request cancelled"
            );
        }
        Ok(())
    }

    fn on_response(&self, request: &ApiRequest, _response: &ApiResponse) {
        self.release(request);
    }

    fn on_error(&self, request: &mut ApiRequest, _error: &ApiError) {
        self.release(request);
    }

    fn on_cancelled(&self, request: &ApiRequest) {
        self.release(request);
    }
}
