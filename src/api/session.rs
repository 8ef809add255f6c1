//! Local session state and session-expiry notifications.
//!
//! The HTTP layer never navigates on its own; it emits a [`SessionEvent`] and
//! the hosting application decides what to do with it.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Location the application should move to after a forced logout.
pub const SESSION_EXPIRED_REDIRECT: &str = "/login?reason=session_expired";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// Server reported the token as revoked, blacklisted or invalid.
    TokenRevoked,
    /// Plain 401 on a request that had not been retried yet.
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Expired {
        reason: LogoutReason,
        redirect: String,
    },
}

impl SessionEvent {
    pub fn expired(reason: LogoutReason) -> Self {
        SessionEvent::Expired {
            reason,
            redirect: SESSION_EXPIRED_REDIRECT.to_string(),
        }
    }
}

pub type SessionListener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Fan-out of session events to subscribed listeners.
#[derive(Clone, Default)]
pub struct SessionEvents {
    listeners: Arc<RwLock<Vec<SessionListener>>>,
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvents")
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    pub fn emit(&self, event: &SessionEvent) {
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

/// Credential held by the client between requests.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token.filter(|t| !t.is_empty()))),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Start a new session, e.g. after signing in again. An empty token clears it.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        *self.token.write() = (!token.is_empty()).then_some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}
