//! Context accessors
//!
//! The read-side surface components use. Each accessor is a direct lookup
//! into the nearest enclosing provider on the given [`Scope`] — no caching,
//! no component-local state — and fails with
//! [`MissingContext`](crate::RouterError::MissingContext) when invoked
//! outside a provider tree.
//!
//! [`use_resolve`] and [`use_navigate`] compose those lookups into handles
//! that are closed over the caller's position: a [`Resolver`] reads the
//! CURRENT base anchors on every call (an enclosing parameterized route can
//! re-match between two calls, and links must follow), and a
//! [`ContextNavigator`] runs every target through that resolver before
//! handing it to the navigation source.

use crate::context::{BaseHandle, Scope};
use crate::error::RouterResult;
use crate::history::{NavigateOptions, NavigationSource};
use crate::location::Location;
use crate::resolve::resolve;
use crate::route::ActiveRoute;
use crate::store::Readable;
use crate::debug_log;
use std::sync::Arc;

#[cfg(feature = "cache")]
use crate::cache::ResolveCache;
#[cfg(feature = "cache")]
use std::sync::{Mutex, PoisonError};

/// Observable handle on the current location.
pub fn use_location(scope: &Scope) -> RouterResult<Readable<Location>> {
    Ok(scope.location_context()?.location.clone())
}

/// Observable handle on the route currently matched by the nearest router.
pub fn use_active_route(scope: &Scope) -> RouterResult<Readable<ActiveRoute>> {
    Ok(scope.router_context()?.active_route.clone())
}

/// Base anchor contributed by the nearest router.
pub fn use_router_base(scope: &Scope) -> RouterResult<BaseHandle> {
    Ok(scope.router_context()?.base.clone())
}

/// Base anchor contributed by the nearest matched route.
pub fn use_route_base(scope: &Scope) -> RouterResult<BaseHandle> {
    Ok(scope.router_context()?.route_base.clone())
}

/// Context-aware resolve function for the caller's position in the tree.
pub fn use_resolve(scope: &Scope) -> RouterResult<Resolver> {
    let router = scope.router_context()?;
    Ok(Resolver {
        base: router.base.clone(),
        route_base: router.route_base.clone(),
        #[cfg(feature = "cache")]
        cache: router.resolve_cache(),
    })
}

/// Context-aware navigate function for the caller's position in the tree.
///
/// Needs both a router context (to resolve targets) and a location context
/// (for the transition primitive); missing either fails here, at setup
/// time, rather than on first click.
pub fn use_navigate(scope: &Scope) -> RouterResult<ContextNavigator> {
    let resolver = use_resolve(scope)?;
    let source = Arc::clone(&scope.location_context()?.source);
    Ok(ContextNavigator { resolver, source })
}

/// Resolves link targets against the live base anchors of a router scope.
#[derive(Clone)]
pub struct Resolver {
    base: BaseHandle,
    route_base: BaseHandle,
    #[cfg(feature = "cache")]
    cache: Arc<Mutex<ResolveCache>>,
}

impl Resolver {
    /// Resolve `path` to an absolute, normalized URI.
    ///
    /// Anchors are read at call time, so two calls straddling a route
    /// re-match resolve against the new position. Pure and total, like the
    /// underlying [`resolve`](crate::resolve()).
    pub fn resolve(&self, path: &str) -> String {
        let base = self.base.current();
        let route_base = self.route_base.current();
        self.resolve_between(path, &base.uri, &route_base.uri)
    }

    #[cfg(feature = "cache")]
    fn resolve_between(&self, path: &str, basepath: &str, current_uri: &str) -> String {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(resolved) = cache.get(path, basepath, current_uri) {
            return resolved;
        }
        let resolved = resolve(path, basepath, current_uri);
        cache.put(path, basepath, current_uri, resolved.clone());
        resolved
    }

    #[cfg(not(feature = "cache"))]
    fn resolve_between(&self, path: &str, basepath: &str, current_uri: &str) -> String {
        resolve(path, basepath, current_uri)
    }
}

/// Navigates to targets resolved against the caller's routing scope.
#[derive(Clone)]
pub struct ContextNavigator {
    resolver: Resolver,
    source: Arc<dyn NavigationSource>,
}

impl ContextNavigator {
    /// Navigate to `to` with default options (push, no state).
    pub fn navigate(&self, to: &str) -> RouterResult<()> {
        self.navigate_with(to, &NavigateOptions::default())
    }

    /// Navigate to `to`, resolving it in context first.
    ///
    /// Fire-and-forget: the source performs the transition and pushes the
    /// resulting location through its observable; this call does not wait
    /// on that propagation. Source failures pass through unchanged.
    pub fn navigate_with(&self, to: &str, options: &NavigateOptions) -> RouterResult<()> {
        let uri = self.resolver.resolve(to);
        debug_log!("navigate in context: '{}' -> '{}'", to, uri);
        self.source.navigate(&uri, options)
    }

    /// The resolver this navigator runs targets through.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}
