//! Observable value containers
//!
//! A [`Store`] holds a single value, supports a synchronous snapshot read,
//! and pushes every write to its subscribers. A [`Readable`] is the
//! subscribe-only face of the same container, handed out to consumers that
//! must not mutate it. There is no ambient reactivity: mutations happen only
//! through [`Store::set`] and [`Store::update`], and subscribers are invoked
//! synchronously, after the value lock has been released.
//!
//! Subscribers are called once immediately on subscribe with the standing
//! value, so late subscribers never miss state that was already current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

impl<T> Shared<T> {
    fn remove_subscriber(&self, id: u64) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|(existing, _)| *existing != id);
    }
}

/// Writable observable container.
pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a store holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Synchronous snapshot of the current value.
    pub fn get(&self) -> T {
        read_value(&self.shared)
    }

    /// Replace the value and notify all subscribers.
    pub fn set(&self, value: T) {
        {
            let mut guard = self
                .shared
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = value;
        }
        notify(&self.shared);
    }

    /// Mutate the value in place and notify all subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut guard = self
                .shared
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
        }
        notify(&self.shared);
    }

    /// Subscribe-only handle onto the same container.
    pub fn readable(&self) -> Readable<T> {
        Readable {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Read-only handle onto a [`Store`]: snapshot reads and subscriptions, no
/// mutation surface.
pub struct Readable<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Readable<T> {
    /// Synchronous snapshot of the current value.
    pub fn get(&self) -> T {
        read_value(&self.shared)
    }

    /// Register `subscriber` for value changes.
    ///
    /// The callback fires immediately with the current value and again on
    /// every subsequent write. The returned [`Subscription`] detaches the
    /// callback when dropped, so it must be held for as long as updates are
    /// wanted.
    pub fn subscribe(&self, subscriber: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let callback: Callback<T> = Arc::new(subscriber);
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);

        {
            let mut subscribers = self
                .shared
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscribers.push((id, Arc::clone(&callback)));
        }

        callback(&read_value(&self.shared));

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.remove_subscriber(id);
                }
            })),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for Readable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

fn read_value<T: Clone>(shared: &Shared<T>) -> T {
    shared
        .value
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn notify<T: Clone>(shared: &Shared<T>) {
    // Snapshot the subscriber list and the value first, then invoke with no
    // locks held, so a callback may freely read the store or subscribe.
    let callbacks: Vec<Callback<T>> = {
        let subscribers = shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    };
    let value = read_value(shared);
    for callback in callbacks {
        callback(&value);
    }
}

/// Guard for an active subscription; dropping it detaches the callback.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Detach explicitly. Equivalent to dropping the guard.
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}
