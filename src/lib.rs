//! # route-hooks
//!
//! Context-scoped routing accessors for component trees, with support for:
//!
//! - **Relative Path Resolution** - turn `"123"`, `"../drafts"`, or
//!   `"/settings"` into absolute URIs anchored at the caller's position
//! - **Explicit Context Scopes** - nearest-provider lookup over a parent
//!   chain, no globals and no prop-passing
//! - **Observable Location & Route State** - subscribe/unsubscribe stores
//!   with synchronous snapshot reads
//! - **Nested Routers** - inner mounts anchor at the enclosing matched route
//! - **Pluggable History Sources** - in-memory source included, host
//!   integrations via one trait
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use route_hooks::{
//!     provide_history, use_location, use_navigate, ActiveRoute, MemoryHistory, RouteInfo,
//!     RouteParams, RouterMount,
//! };
//!
//! // The history source publishes the location; a mount publishes the
//! // router context. Both hand back scopes to thread through the tree.
//! let history = Arc::new(MemoryHistory::new());
//! let root = provide_history(None, history);
//! let mount = RouterMount::mount(&root, "/app")?;
//!
//! // The embedding matcher feeds in match results.
//! mount.set_active_route(ActiveRoute::matched(
//!     RouteInfo::new("blog", "/app/blog"),
//!     RouteParams::new(),
//! ));
//!
//! // Components read through hooks, relative to their scope.
//! let navigate = use_navigate(&mount.scope())?;
//! navigate.navigate("123")?;
//!
//! let location = use_location(&mount.scope())?;
//! assert_eq!(location.get().pathname, "/app/blog/123");
//! # Ok::<(), route_hooks::RouterError>(())
//! ```
//!
//! # Resolution Rules
//!
//! A target starting with `/` is anchored at the nearest router's base; any
//! other target is appended to the URI of the nearest matched route. `..`
//! climbs and clamps at the root, `.` and the empty string mean "here".
//! Resolution is pure and total — malformed input degrades to a normalized
//! best-effort URI instead of failing, because it runs on every link and
//! click.
//!
//! ```
//! use route_hooks::resolve;
//!
//! assert_eq!(resolve("123", "/app", "/app/blog"), "/app/blog/123");
//! assert_eq!(resolve("/settings", "/app", "/app/blog/123"), "/app/settings");
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - route diagnostics through the standard `log` crate
//! - `tracing` - use the `tracing` crate instead (mutually exclusive with
//!   `log`)
//! - `cache` (default) - LRU memoization of in-context resolutions

#![doc(html_root_url = "https://docs.rs/route-hooks/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core modules
pub mod context;
pub mod history;
pub mod hooks;
pub mod location;
pub mod params;
pub mod resolve;
pub mod route;
pub mod store;

// Error handling
pub mod error;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, ResolveCache};
pub use context::{
    provide_history, BaseHandle, ContextKey, LocationContext, RouterContext, RouterMount, Scope,
};
pub use error::{RouterError, RouterResult};
pub use history::{
    HistoryEntry, MemoryHistory, NavigateOptions, NavigationEvent, NavigationSource,
};
pub use hooks::{
    use_active_route, use_location, use_navigate, use_resolve, use_route_base, use_router_base,
    ContextNavigator, Resolver,
};
pub use location::{Location, NavState};
pub use params::RouteParams;
pub use resolve::{normalize, resolve};
pub use route::{ActiveRoute, Base, RouteInfo};
pub use store::{Readable, Store, Subscription};

/// Direction of a history operation.
///
/// Reported on [`NavigationEvent`]s so embeddings can distinguish a fresh
/// transition from traversal of existing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// A new entry was pushed, or the cursor moved forward.
    Forward,
    /// The cursor moved back in history.
    Back,
    /// The current entry was replaced in place.
    Replace,
}
