//! Location parsing and path → page mapping.
//!
//! Only `/` and `/vendors` are routed. Any other path (including the login
//! redirect) resolves to no page and the shell renders an empty body.

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Route {
    Home,
    Vendors,
}

impl Route {
    /// Routes in navigation-bar order.
    pub const ALL: [Route; 2] = [Route::Home, Route::Vendors];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Vendors => "/vendors",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Vendors => "Vendor List",
        }
    }

    /// Exact match on the path component.
    pub fn resolve(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Current location: path plus decoded query pairs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        let path = if path.is_empty() { "/" } else { path };
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn route(&self) -> Option<Route> {
        Route::resolve(&self.path)
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::parse(Route::Home.path())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (idx, (key, value)) in self.query.iter().enumerate() {
            let sep = if idx == 0 { '?' } else { '&' };
            if value.is_empty() {
                write!(f, "{}{}", sep, key)?;
            } else {
                write!(f, "{}{}={}", sep, key, value)?;
            }
        }
        Ok(())
    }
}
