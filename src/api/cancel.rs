use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::Notify;

/// Reason used when a caller cancels through [`CancelHandle::cancel_by_user`].
pub const USER_CANCEL_REASON: &str = "Request cancelled by user";

/// Cooperative cancellation handle shared between a request and whoever may
/// cancel it (the de-duplication registry or the caller).
///
/// Clones share the same state. The first `cancel` wins; its reason is the one
/// surfaced to the request.
///
/// A handle made with [`CancelHandle::linked`] also reports cancelled once its
/// parent is, but cancelling it never reaches the parent.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    reason: Mutex<Option<String>>,
    notify: Notify,
    children: Mutex<Vec<Weak<CancelState>>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A per-request handle that follows `parent`.
    ///
    /// One caller token can then be shared by several requests without one
    /// request's cancellation leaking into the others.
    pub fn linked(parent: &CancelHandle) -> Self {
        let child = Self::new();
        // `cancel` sets the flag before draining children, so checking it
        // under the same lock cannot miss a concurrent parent cancel.
        let mut children = parent.inner.children.lock();
        if parent.is_cancelled() {
            drop(children);
            child.cancel(parent.reason().unwrap_or_else(|| USER_CANCEL_REASON.to_string()));
        } else {
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        child
    }

    /// Cancel with the given reason. Returns false if already cancelled.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let mut slot = self.inner.reason.lock();
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        let reason = reason.into();
        *slot = Some(reason.clone());
        drop(slot);
        self.inner.notify.notify_waiters();

        let children = std::mem::take(&mut *self.inner.children.lock());
        for inner in children.iter().filter_map(Weak::upgrade) {
            CancelHandle { inner }.cancel(reason.as_str());
        }
        true
    }

    pub fn cancel_by_user(&self) -> bool {
        self.cancel(USER_CANCEL_REASON)
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    pub fn reason(&self) -> Option<String> {
        self.inner.reason.lock().clone()
    }

    /// True when both handles refer to the same request.
    pub fn same_as(&self, other: &CancelHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolves once the handle is cancelled.
    pub async fn cancelled(&self) {
        // Register interest before checking the flag so a concurrent cancel
        // between the check and the await is not lost.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
