//! Navigation sources and history management
//!
//! [`NavigationSource`] is the boundary this crate consumes for actual URL
//! transitions: a source exposes the current [`Location`] as an observable
//! and accepts absolute-URI navigation requests. [`MemoryHistory`] is the
//! in-process implementation, keeping an entry stack with:
//!
//! - Forward/backward traversal
//! - Truncation of forward entries on push
//! - Replace-in-place without growing the stack
//! - A configurable entry limit
//! - State payloads carried per entry

use crate::error::{RouterError, RouterResult};
use crate::location::{Location, NavState};
use crate::store::{Readable, Store};
use crate::{debug_log, NavigationDirection};
use std::sync::{Mutex, PoisonError};

/// Options for a navigation request.
///
/// `replace` defaults to `false` (push a new entry); `state` defaults to
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Opaque payload delivered on the resulting location snapshot.
    pub state: Option<NavState>,
    /// Replace the current entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a state payload.
    pub fn with_state(mut self, state: NavState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the replace flag.
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}

/// External transition primitive consumed by the navigate hook.
///
/// Implementations publish every transition to their location observable;
/// the hook side is fire-and-forget and never waits on that propagation.
pub trait NavigationSource: Send + Sync {
    /// Observable handle on the current location.
    fn location(&self) -> Readable<Location>;

    /// Perform a transition to an absolute URI.
    fn navigate(&self, uri: &str, options: &NavigateOptions) -> RouterResult<()>;
}

/// One entry in a history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Absolute URI (path, optionally query and fragment).
    pub uri: String,
    /// State payload attached when the entry was created.
    pub state: Option<NavState>,
}

impl HistoryEntry {
    fn new(uri: String, state: Option<NavState>) -> Self {
        Self { uri, state }
    }
}

/// Event describing one completed history operation.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Previous URI.
    pub from: Option<String>,
    /// New URI.
    pub to: String,
    /// Direction of the move.
    pub direction: NavigationDirection,
}

struct HistoryStack {
    entries: Vec<HistoryEntry>,
    current: usize,
    max_entries: usize,
}

impl HistoryStack {
    fn current_entry(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    fn push(&mut self, uri: String, state: Option<NavState>) -> NavigationEvent {
        let from = Some(self.current_entry().uri.clone());

        // Forward entries are unreachable after a push.
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry::new(uri.clone(), state));
        self.current += 1;

        self.enforce_entry_limit();

        NavigationEvent {
            from,
            to: uri,
            direction: NavigationDirection::Forward,
        }
    }

    fn replace(&mut self, uri: String, state: Option<NavState>) -> NavigationEvent {
        let from = Some(self.current_entry().uri.clone());

        self.entries[self.current] = HistoryEntry::new(uri.clone(), state);

        NavigationEvent {
            from,
            to: uri,
            direction: NavigationDirection::Replace,
        }
    }

    fn enforce_entry_limit(&mut self) {
        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

/// In-process navigation source backed by an entry stack.
///
/// Serves the same purpose for tests and host-less embeddings that a real
/// browser history serves in a web host: it owns the current location,
/// performs transitions, and publishes each one to subscribers.
pub struct MemoryHistory {
    origin: String,
    stack: Mutex<HistoryStack>,
    location: Store<Location>,
}

impl MemoryHistory {
    const DEFAULT_ORIGIN: &'static str = "http://localhost";
    const DEFAULT_MAX_ENTRIES: usize = 1000;

    /// Create a history rooted at `/` under the default origin.
    pub fn new() -> Self {
        Self::with_origin(Self::DEFAULT_ORIGIN).expect("default origin must be a valid URL")
    }

    /// Create a history under a custom origin, e.g. `"app://local"`.
    pub fn with_origin(origin: &str) -> RouterResult<Self> {
        let initial = Location::with_origin(origin, "/", None)?;
        Ok(Self {
            origin: origin.to_string(),
            stack: Mutex::new(HistoryStack {
                entries: vec![HistoryEntry::new("/".to_string(), None)],
                current: 0,
                max_entries: Self::DEFAULT_MAX_ENTRIES,
            }),
            location: Store::new(initial),
        })
    }

    /// Cap the entry stack; the oldest entries drop first. `0` disables the
    /// limit.
    pub fn with_max_entries(self, max_entries: usize) -> Self {
        self.lock().max_entries = max_entries;
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryStack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, entry: &HistoryEntry) -> RouterResult<()> {
        let location = Location::with_origin(&self.origin, &entry.uri, entry.state.clone())?;
        self.location.set(location);
        Ok(())
    }

    /// URI of the current entry.
    pub fn current_uri(&self) -> String {
        self.lock().current_entry().uri.clone()
    }

    /// Number of entries on the stack.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// The stack always holds at least the initial entry.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Whether a back move is possible.
    pub fn can_go_back(&self) -> bool {
        self.lock().current > 0
    }

    /// Whether a forward move is possible.
    pub fn can_go_forward(&self) -> bool {
        let stack = self.lock();
        stack.current < stack.entries.len() - 1
    }

    /// Move back one entry, republishing its location.
    pub fn back(&self) -> Option<NavigationEvent> {
        let (event, entry) = {
            let mut stack = self.lock();
            if stack.current == 0 {
                return None;
            }
            let from = Some(stack.current_entry().uri.clone());
            stack.current -= 1;
            let entry = stack.current_entry().clone();
            (
                NavigationEvent {
                    from,
                    to: entry.uri.clone(),
                    direction: NavigationDirection::Back,
                },
                entry,
            )
        };

        debug_log!("history back -> '{}'", event.to);
        self.publish(&entry).ok()?;
        Some(event)
    }

    /// Move forward one entry, republishing its location.
    pub fn forward(&self) -> Option<NavigationEvent> {
        let (event, entry) = {
            let mut stack = self.lock();
            if stack.current >= stack.entries.len() - 1 {
                return None;
            }
            let from = Some(stack.current_entry().uri.clone());
            stack.current += 1;
            let entry = stack.current_entry().clone();
            (
                NavigationEvent {
                    from,
                    to: entry.uri.clone(),
                    direction: NavigationDirection::Forward,
                },
                entry,
            )
        };

        debug_log!("history forward -> '{}'", event.to);
        self.publish(&entry).ok()?;
        Some(event)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationSource for MemoryHistory {
    fn location(&self) -> Readable<Location> {
        self.location.readable()
    }

    fn navigate(&self, uri: &str, options: &NavigateOptions) -> RouterResult<()> {
        if !uri.starts_with('/') {
            return Err(RouterError::NavigationFailed {
                message: format!("target must be an absolute path: '{}'", uri),
            });
        }

        // Validate the target before touching the stack.
        let location = Location::with_origin(&self.origin, uri, options.state.clone())?;

        let event = {
            let mut stack = self.lock();
            if options.replace {
                stack.replace(uri.to_string(), options.state.clone())
            } else {
                stack.push(uri.to_string(), options.state.clone())
            }
        };

        debug_log!(
            "navigate ({:?}): '{}' -> '{}'",
            event.direction,
            event.from.as_deref().unwrap_or(""),
            event.to
        );

        self.location.set(location);
        Ok(())
    }
}
