//! Routing context and providers
//!
//! Context here is an explicit [`Scope`] chain rather than anything ambient:
//! every node holds a parent pointer plus at most one published context
//! record, and lookup walks toward the root until it finds the nearest
//! provider. Components thread the `Arc<Scope>` of their position through
//! composition; hooks read from it.
//!
//! Two well-known context keys exist:
//!
//! - [`ContextKey::Location`] — published by [`provide_history`], yields the
//!   location observable and the navigation source behind it.
//! - [`ContextKey::Router`] — published by a [`RouterMount`], yields the
//!   active-route observable and the two base anchors.
//!
//! Looking up a key with no ancestor provider is a structural mistake and
//! returns [`RouterError::MissingContext`] — loud and immediate, never a
//! silent default.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ResolveCache};
use crate::error::{RouterError, RouterResult};
use crate::history::NavigationSource;
use crate::location::Location;
use crate::resolve::normalize;
use crate::route::{ActiveRoute, Base};
use crate::store::{Readable, Store};
use crate::debug_log;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
#[cfg(feature = "cache")]
use std::sync::Mutex;

/// Well-known context keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKey {
    /// The location observable and navigation source.
    Location,
    /// The active route and base anchors of the nearest router.
    Router,
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::Location => write!(f, "location"),
            ContextKey::Router => write!(f, "router"),
        }
    }
}

/// Shared `{ current: Base }` holder.
///
/// Readable at any time via [`current`](Self::current); only the provider
/// layer writes it, when the enclosing route re-matches. The handle itself
/// is fixed for the lifetime of its mount, which is what lets resolvers read
/// fresh snapshots at call time instead of capturing one.
#[derive(Debug, Clone)]
pub struct BaseHandle {
    current: Arc<RwLock<Base>>,
}

impl BaseHandle {
    /// Create a handle holding `base`.
    pub fn new(base: Base) -> Self {
        Self {
            current: Arc::new(RwLock::new(base)),
        }
    }

    /// Snapshot of the current base.
    pub fn current(&self) -> Base {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set(&self, base: Base) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = base;
    }
}

/// Context record published by a history provider.
#[derive(Clone)]
pub struct LocationContext {
    /// Observable handle on the current location.
    pub location: Readable<Location>,
    /// The transition primitive behind that location.
    pub source: Arc<dyn NavigationSource>,
}

impl LocationContext {
    /// Build the record for a navigation source.
    pub fn new(source: Arc<dyn NavigationSource>) -> Self {
        Self {
            location: source.location(),
            source,
        }
    }
}

impl fmt::Debug for LocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationContext").finish_non_exhaustive()
    }
}

/// Context record published by a router mount.
#[derive(Clone)]
pub struct RouterContext {
    /// Observable handle on the currently matched route.
    pub active_route: Readable<ActiveRoute>,
    /// Base contributed by the router itself; anchors absolute targets.
    pub base: BaseHandle,
    /// Base contributed by the currently matched route; anchors relative
    /// targets. Falls back to `base` while nothing is matched.
    pub route_base: BaseHandle,
    #[cfg(feature = "cache")]
    resolve_cache: Arc<Mutex<ResolveCache>>,
}

impl RouterContext {
    /// Build the record for a mount.
    pub fn new(active_route: Readable<ActiveRoute>, base: BaseHandle, route_base: BaseHandle) -> Self {
        Self {
            active_route,
            base,
            route_base,
            #[cfg(feature = "cache")]
            resolve_cache: Arc::new(Mutex::new(ResolveCache::new())),
        }
    }

    #[cfg(feature = "cache")]
    pub(crate) fn resolve_cache(&self) -> Arc<Mutex<ResolveCache>> {
        Arc::clone(&self.resolve_cache)
    }

    #[cfg(feature = "cache")]
    pub(crate) fn invalidate_resolve_cache(&self) {
        self.resolve_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Memo statistics for this router's resolutions.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.resolve_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
            .clone()
    }
}

impl fmt::Debug for RouterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterContext")
            .field("base", &self.base.current())
            .field("route_base", &self.route_base.current())
            .finish_non_exhaustive()
    }
}

/// One node in the explicit context chain.
///
/// A scope is immutable once created: providers create child scopes rather
/// than mutating existing ones, and a subtree's contexts go away when the
/// last `Arc` to its scopes drops.
pub struct Scope {
    parent: Option<Arc<Scope>>,
    location: Option<LocationContext>,
    router: Option<RouterContext>,
}

impl Scope {
    /// A bare scope with no providers. Lookups on it fail with
    /// [`RouterError::MissingContext`].
    pub fn root() -> Arc<Self> {
        Arc::new(Self {
            parent: None,
            location: None,
            router: None,
        })
    }

    /// Child scope publishing a location context.
    pub fn with_location(parent: Option<&Arc<Self>>, context: LocationContext) -> Arc<Self> {
        Arc::new(Self {
            parent: parent.cloned(),
            location: Some(context),
            router: None,
        })
    }

    /// Child scope publishing a router context.
    pub fn with_router(parent: &Arc<Self>, context: RouterContext) -> Arc<Self> {
        Arc::new(Self {
            parent: Some(Arc::clone(parent)),
            location: None,
            router: Some(context),
        })
    }

    /// Nearest enclosing location context.
    pub fn location_context(&self) -> RouterResult<&LocationContext> {
        let mut scope = self;
        loop {
            if let Some(context) = scope.location.as_ref() {
                return Ok(context);
            }
            match scope.parent.as_deref() {
                Some(parent) => scope = parent,
                None => {
                    return Err(RouterError::MissingContext {
                        key: ContextKey::Location,
                    })
                }
            }
        }
    }

    /// Nearest enclosing router context.
    pub fn router_context(&self) -> RouterResult<&RouterContext> {
        let mut scope = self;
        loop {
            if let Some(context) = scope.router.as_ref() {
                return Ok(context);
            }
            match scope.parent.as_deref() {
                Some(parent) => scope = parent,
                None => {
                    return Err(RouterError::MissingContext {
                        key: ContextKey::Router,
                    })
                }
            }
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("has_location", &self.location.is_some())
            .field("has_router", &self.router.is_some())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Publish a [`LocationContext`] for `source`, returning the scope
/// descendants should thread through.
pub fn provide_history(
    parent: Option<&Arc<Scope>>,
    source: Arc<dyn NavigationSource>,
) -> Arc<Scope> {
    Scope::with_location(parent, LocationContext::new(source))
}

/// A mounted router level.
///
/// The mount owns the writable side of the router context: the embedding
/// machinery calls [`set_active_route`](Self::set_active_route) /
/// [`clear_active_route`](Self::clear_active_route) on every match event,
/// and descendants read through [`scope`](Self::scope). The base anchors are
/// fixed when the mount is created and torn down with it.
pub struct RouterMount {
    scope: Arc<Scope>,
    active_route: Store<ActiveRoute>,
    context: RouterContext,
}

impl RouterMount {
    /// Mount a top-level router under `basepath`.
    ///
    /// Requires an enclosing location provider; the router's base is the
    /// normalized basepath, and the route base starts equal to it.
    pub fn mount(parent: &Arc<Scope>, basepath: &str) -> RouterResult<Self> {
        parent.location_context()?;
        let base = Base::new(basepath, normalize(basepath));
        debug_log!("mounting router at '{}'", base.uri);
        Ok(Self::install(parent, base))
    }

    /// Mount a nested router.
    ///
    /// Its base is the enclosing router's current route base, snapshotted
    /// now and fixed for this mount's lifetime.
    pub fn nest(parent: &Arc<Scope>) -> RouterResult<Self> {
        let base = parent.router_context()?.route_base.current();
        debug_log!("mounting nested router under '{}'", base.uri);
        Ok(Self::install(parent, base))
    }

    fn install(parent: &Arc<Scope>, base: Base) -> Self {
        let active_route = Store::new(ActiveRoute::unmatched(base.uri.clone()));
        let base_handle = BaseHandle::new(base.clone());
        let route_base = BaseHandle::new(base);
        let context = RouterContext::new(active_route.readable(), base_handle, route_base);
        let scope = Scope::with_router(parent, context.clone());
        Self {
            scope,
            active_route,
            context,
        }
    }

    /// The scope descendants of this router thread through calls.
    pub fn scope(&self) -> Arc<Scope> {
        Arc::clone(&self.scope)
    }

    /// The context record this mount published.
    pub fn context(&self) -> &RouterContext {
        &self.context
    }

    /// Feed in a new match result.
    ///
    /// Re-derives the route base: a matched route contributes its pattern
    /// (wildcard rest stripped) and resolved URI; the no-match state falls
    /// back to the router base. Subscribers of the active-route observable
    /// are notified after the anchors are in place, so anything they resolve
    /// already sees the new position.
    pub fn set_active_route(&self, active: ActiveRoute) {
        let next_base = match active.route.as_ref() {
            Some(route) => Base::new(route.base_path(), active.uri.clone()),
            None => self.context.base.current(),
        };
        debug_log!("active route -> '{}'", active.uri);
        self.context.route_base.set(next_base);
        #[cfg(feature = "cache")]
        self.context.invalidate_resolve_cache();
        self.active_route.set(active);
    }

    /// Revert to the no-match state.
    pub fn clear_active_route(&self) {
        let base = self.context.base.current();
        self.context.route_base.set(base.clone());
        #[cfg(feature = "cache")]
        self.context.invalidate_resolve_cache();
        self.active_route.set(ActiveRoute::unmatched(base.uri));
    }
}

impl fmt::Debug for RouterMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterMount")
            .field("base", &self.context.base.current())
            .finish_non_exhaustive()
    }
}
