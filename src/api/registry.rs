//! Registry of in-flight requests keyed by request signature.
//!
//! Owned by an [`ApiClient`](crate::api::ApiClient) instance and shared with the
//! de-duplication stage. Holds at most one handle per key.

use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::cancel::CancelHandle;

#[derive(Clone, Debug, Default)]
pub struct PendingRequests {
    inner: Arc<Mutex<HashMap<String, CancelHandle>>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` under `key`, cancelling any previous holder.
    ///
    /// Returns true when an existing request was superseded.
    ///
    /// Registering the handle that already holds the entry is a no-op.
    pub fn supersede(&self, key: String, handle: CancelHandle, reason: &str) -> bool {
        let previous = self.inner.lock().insert(key.clone(), handle.clone());
        match previous {
            Some(previous) if previous.same_as(&handle) => false,
            Some(previous) => {
                previous.cancel(reason);
                tracing::debug!(key = %key, "Superseded in-flight request");
                true
            }
            None => false,
        }
    }

    /// Remove the entry for `key` if it still belongs to `handle`.
    ///
    /// A request that settles after being superseded leaves its successor's
    /// entry in place.
    pub fn settle(&self, key: &str, handle: &CancelHandle) -> bool {
        let mut map = self.inner.lock();
        match map.get(key) {
            Some(current) if current.same_as(handle) => {
                map.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Snapshot of the tracked keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Cancel every tracked request and clear the registry.
    pub fn cancel_all(&self, reason: &str) -> usize {
        let drained: Vec<CancelHandle> = self.inner.lock().drain().map(|(_, h)| h).collect();
        for handle in &drained {
            handle.cancel(reason);
        }
        drained.len()
    }

    /// Cancel and remove the requests whose key matches `pattern`.
    pub fn cancel_matching(&self, pattern: &Regex, reason: &str) -> usize {
        let mut matched = Vec::new();
        self.inner.lock().retain(|key, handle| {
            if pattern.is_match(key) {
                matched.push(handle.clone());
                false
            } else {
                true
            }
        });
        for handle in &matched {
            handle.cancel(reason);
        }
        matched.len()
    }
}
