//! Route and base value types
//!
//! Plain value snapshots describing the routing position of a subtree. The
//! embedding matcher creates them on every match event; hooks only read
//! them. None of these own resources or carry lifetime beyond the snapshot.

use crate::params::RouteParams;

/// The declared pattern of a matched route and its fully resolved URI.
///
/// `path` is the pattern as written by the route's parent (it may carry
/// `:param` tokens or a trailing `*rest` wildcard) and is never used for
/// resolution directly; `uri` is the absolute, normalized form the pattern
/// resolved to for the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Declared pattern, e.g. `"blog/:id"`.
    pub path: String,
    /// Resolved absolute URI, e.g. `"/app/blog/123"`.
    pub uri: String,
}

impl RouteInfo {
    /// Create a new route descriptor.
    pub fn new(path: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            uri: uri.into(),
        }
    }

    /// The pattern with any `*` wildcard rest stripped.
    ///
    /// A route matching `"docs/*rest"` scopes its descendants under
    /// `"docs/"`; the wildcard tail belongs to deeper matching, not to the
    /// base contributed by this route.
    pub fn base_path(&self) -> &str {
        match self.path.find('*') {
            Some(idx) => &self.path[..idx],
            None => &self.path,
        }
    }
}

/// The route currently matched for a router scope, plus extracted
/// parameters.
///
/// `route` is `None` when nothing matched; `uri` then falls back to the
/// router's base URI so relative resolution still has an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoute {
    /// The matched route, if any.
    pub route: Option<RouteInfo>,
    /// Parameters extracted from the matched path.
    pub params: RouteParams,
    /// Absolute URI the match resolved to.
    pub uri: String,
}

impl ActiveRoute {
    /// Snapshot for a successful match.
    pub fn matched(route: RouteInfo, params: RouteParams) -> Self {
        Self {
            uri: route.uri.clone(),
            route: Some(route),
            params,
        }
    }

    /// Snapshot for the no-match state, anchored at `uri`.
    pub fn unmatched(uri: impl Into<String>) -> Self {
        Self {
            route: None,
            params: RouteParams::new(),
            uri: uri.into(),
        }
    }

    /// Whether a route is currently matched.
    pub fn is_matched(&self) -> bool {
        self.route.is_some()
    }
}

/// The routing scope contributed by one router or route mount.
///
/// `path` is the mount pattern as declared by the parent (possibly relative,
/// e.g. `"blog/:id/"`); `uri` is its fully resolved absolute form. Only
/// `uri` ever takes part in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base {
    /// Declared mount pattern.
    pub path: String,
    /// Resolved absolute URI of the mount.
    pub uri: String,
}

impl Base {
    /// Create a new base.
    pub fn new(path: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            uri: uri.into(),
        }
    }

    /// The root scope: pattern and URI both `"/"`.
    pub fn root() -> Self {
        Self::new("/", "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_info_base_path_strips_wildcard_rest() {
        assert_eq!(RouteInfo::new("docs/*rest", "/docs/a/b").base_path(), "docs/");
        assert_eq!(RouteInfo::new("*", "/anything").base_path(), "");
        assert_eq!(RouteInfo::new("blog/:id", "/blog/1").base_path(), "blog/:id");
    }

    #[test]
    fn test_active_route_matched() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());

        let active = ActiveRoute::matched(RouteInfo::new("blog/:id", "/app/blog/123"), params);

        assert!(active.is_matched());
        assert_eq!(active.uri, "/app/blog/123");
        assert_eq!(active.params.get("id"), Some(&"123".to_string()));
    }

    #[test]
    fn test_active_route_unmatched() {
        let active = ActiveRoute::unmatched("/app");

        assert!(!active.is_matched());
        assert_eq!(active.uri, "/app");
        assert!(active.params.is_empty());
    }

    #[test]
    fn test_base_root() {
        let base = Base::root();
        assert_eq!(base.path, "/");
        assert_eq!(base.uri, "/");
    }
}
