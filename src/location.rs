//! Location snapshots
//!
//! A [`Location`] is a read-only snapshot of the current URL, split into the
//! usual components, plus an opaque navigation-state payload. Sources
//! produce a fresh snapshot on every transition and push it through the
//! location store; nothing in this crate ever mutates one after creation.

use crate::error::{RouterError, RouterResult};
use std::collections::HashMap;
use url::Url;

/// Opaque state payload attached to a navigation.
///
/// Carried verbatim from the navigate call to the resulting [`Location`]
/// snapshot (scroll offsets, origin-screen hints, and the like). The core
/// never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    data: HashMap<String, String>,
}

impl NavState {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Get a value.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    /// Check whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Snapshot of the current URL plus the navigation-state payload.
///
/// Field split mirrors the common location record: `search` carries its
/// leading `?` and `hash` its leading `#` when present, and both are empty
/// strings otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Full serialized URL.
    pub href: String,
    /// Scheme + host (+ port when explicit), e.g. `"http://localhost"`.
    pub origin: String,
    /// Scheme with trailing colon, e.g. `"http:"`.
    pub protocol: String,
    /// Host, with port when explicit, e.g. `"localhost:8080"`.
    pub host: String,
    /// Host without port.
    pub hostname: String,
    /// Port as a string, empty when implicit.
    pub port: String,
    /// Absolute path component, e.g. `"/app/blog/123"`.
    pub pathname: String,
    /// Query string including `?`, or empty.
    pub search: String,
    /// Fragment including `#`, or empty.
    pub hash: String,
    /// Opaque payload attached by the navigation that produced this
    /// snapshot.
    pub state: Option<NavState>,
}

impl Location {
    /// Build a snapshot from an absolute URL string.
    pub fn parse(href: &str) -> RouterResult<Self> {
        let url = Url::parse(href).map_err(|error| RouterError::InvalidLocation {
            message: format!("{}: {}", href, error),
        })?;
        Ok(Self::from_url(&url, None))
    }

    /// Build a snapshot for `path` (which may carry a query and fragment)
    /// under `origin`, attaching `state`.
    ///
    /// This is the constructor in-memory sources use, where only the path
    /// part moves and the origin is fixed.
    pub fn with_origin(origin: &str, path: &str, state: Option<NavState>) -> RouterResult<Self> {
        let base = Url::parse(origin).map_err(|error| RouterError::InvalidLocation {
            message: format!("{}: {}", origin, error),
        })?;
        let url = base.join(path).map_err(|error| RouterError::InvalidLocation {
            message: format!("{}: {}", path, error),
        })?;
        Ok(Self::from_url(&url, state))
    }

    fn from_url(url: &Url, state: Option<NavState>) -> Self {
        let hostname = url.host_str().unwrap_or_default().to_string();
        let host = match url.port() {
            Some(port) => format!("{}:{}", hostname, port),
            None => hostname.clone(),
        };

        Self {
            href: url.to_string(),
            origin: url.origin().ascii_serialization(),
            protocol: format!("{}:", url.scheme()),
            host,
            hostname,
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
            pathname: url.path().to_string(),
            search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
            hash: url.fragment().map(|f| format!("#{}", f)).unwrap_or_default(),
            state,
        }
    }

    /// Path, query, and fragment joined back together.
    pub fn full_path(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_href() {
        let location = Location::parse("https://example.com:8443/app/blog/1?page=2#top").unwrap();

        assert_eq!(location.origin, "https://example.com:8443");
        assert_eq!(location.protocol, "https:");
        assert_eq!(location.host, "example.com:8443");
        assert_eq!(location.hostname, "example.com");
        assert_eq!(location.port, "8443");
        assert_eq!(location.pathname, "/app/blog/1");
        assert_eq!(location.search, "?page=2");
        assert_eq!(location.hash, "#top");
        assert!(location.state.is_none());
    }

    #[test]
    fn test_parse_without_query_or_fragment() {
        let location = Location::parse("http://localhost/app").unwrap();

        assert_eq!(location.pathname, "/app");
        assert_eq!(location.search, "");
        assert_eq!(location.hash, "");
        assert_eq!(location.port, "");
        assert_eq!(location.host, "localhost");
    }

    #[test]
    fn test_parse_rejects_relative_input() {
        assert!(matches!(
            Location::parse("/app/blog"),
            Err(RouterError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_with_origin_joins_path() {
        let location = Location::with_origin("http://localhost", "/a/b?x=1#frag", None).unwrap();

        assert_eq!(location.href, "http://localhost/a/b?x=1#frag");
        assert_eq!(location.pathname, "/a/b");
        assert_eq!(location.search, "?x=1");
        assert_eq!(location.hash, "#frag");
        assert_eq!(location.full_path(), "/a/b?x=1#frag");
    }

    #[test]
    fn test_with_origin_carries_state() {
        let mut state = NavState::new();
        state.set("from", "/inbox");

        let location = Location::with_origin("http://localhost", "/sent", Some(state)).unwrap();

        let carried = location.state.as_ref().unwrap();
        assert_eq!(carried.get("from"), Some(&"/inbox".to_string()));
    }

    #[test]
    fn test_with_origin_rejects_bad_origin() {
        assert!(matches!(
            Location::with_origin("not a url", "/a", None),
            Err(RouterError::InvalidLocation { .. })
        ));
    }
}
