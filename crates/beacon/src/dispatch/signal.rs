//! Signal<P> — a typed, multi-listener event channel.
//!
//! Listeners are stored in a generational slot map plus an attachment-order
//! list. `fire` snapshots the order list, then re-checks each entry's
//! liveness right before invoking it, so:
//!   - A listener added *during* a fire is NOT called until the next fire.
//!   - A listener detached *during* a fire is NOT called in that fire,
//!     even though it was in the snapshot.
//!
//! Panics inside a listener propagate to the caller of `fire` and abort
//! delivery to the rest of the snapshot — no error isolation at this level.
//!
//! # Threading model
//!
//! All methods take `&self` (interior mutability via `parking_lot::Mutex`).
//! The registry lock is held only while mutating or snapshotting and is
//! always released before a listener runs, so listeners can freely call
//! `attach`/`detach` or fire this or other signals without deadlocking.
//! The design provides no cross-thread delivery guarantees: one logical
//! thread of control is expected to fire a given signal at a time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::error::{Result, SignalError};

use super::handle::{ListenerHandle, ListenerKey};

/// Listener count at which `attach` starts warning. A leak canary, not a
/// limit — attachment still succeeds.
pub const DEFAULT_MAX_LISTENERS: usize = 100;

/// Signal identities are process-global so a handle can never detach an
/// entry on a signal other than the one that issued it.
static NEXT_SIGNAL_ID: AtomicU64 = AtomicU64::new(1);

/// Stored callback. Returns `false` when its weak subscriber is gone and
/// the entry should be pruned.
type ListenerFn<P> = dyn Fn(&P) -> bool + Send + Sync;

struct ListenerEntry<P> {
    callback: Arc<ListenerFn<P>>,
    /// Allocation address of the weak subscriber, if any. Used only as an
    /// identity token by `detach_subscriber`; never dereferenced.
    subscriber: Option<usize>,
}

struct Registry<P> {
    entries: SlotMap<ListenerKey, ListenerEntry<P>>,
    /// Attachment order. Dispatch order equals this, minus detached keys.
    order: Vec<ListenerKey>,
    torn_down: bool,
    max_listeners: usize,
}

impl<P> Registry<P> {
    fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            torn_down: false,
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }

    fn remove(&mut self, key: ListenerKey) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }
}

struct SignalCore<P> {
    id: u64,
    name: Option<String>,
    registry: Mutex<Registry<P>>,
}

/// Typed synchronous signal.
///
/// `P` is the payload type delivered to every listener by reference on each
/// fire. `Clone` yields another reference to the same channel (the core is
/// shared), which is how an owner can expose a signal while retaining the
/// right to tear it down.
pub struct Signal<P> {
    core: Arc<SignalCore<P>>,
}

impl<P> Clone for Signal<P> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<P> Default for Signal<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Signal<P> {
    /// Create a new, unnamed signal with an empty registry.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a new signal carrying `name` in tracing events and errors.
    pub fn named(name: impl Into<String>) -> Self {
        Self::build(Some(name.into()))
    }

    fn build(name: Option<String>) -> Self {
        Self {
            core: Arc::new(SignalCore {
                id: NEXT_SIGNAL_ID.fetch_add(1, Ordering::Relaxed),
                name,
                registry: Mutex::new(Registry::new()),
            }),
        }
    }

    /// The diagnostic name given at construction, if any.
    pub fn name(&self) -> Option<&str> {
        self.core.name.as_deref()
    }

    fn label(&self) -> &str {
        self.core.name.as_deref().unwrap_or("<unnamed>")
    }

    // -----------------------------------------------------------------------
    // Attach / detach
    // -----------------------------------------------------------------------

    /// Register `callback`, appended at the end of the current dispatch
    /// order. Returns the handle that detaches exactly this listener.
    ///
    /// Fails with [`SignalError::TornDown`] once the signal's owner has
    /// torn it down.
    pub fn attach<F>(&self, callback: F) -> Result<ListenerHandle>
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let callback: Arc<ListenerFn<P>> = Arc::new(move |payload: &P| {
            callback(payload);
            true
        });
        self.attach_entry(callback, None)
    }

    /// Register a callback bound to `subscriber`, held weakly.
    ///
    /// The entry never extends the subscriber's lifetime. Once the last
    /// strong reference to the subscriber is dropped, delivery becomes a
    /// no-op and the entry is pruned from the registry on the next fire
    /// that reaches it.
    pub fn attach_weak<S, F>(&self, subscriber: &Arc<S>, callback: F) -> Result<ListenerHandle>
    where
        S: Send + Sync + 'static,
        F: Fn(&S, &P) + Send + Sync + 'static,
    {
        let weak: Weak<S> = Arc::downgrade(subscriber);
        let addr = Arc::as_ptr(subscriber) as usize;
        let callback: Arc<ListenerFn<P>> = Arc::new(move |payload: &P| match weak.upgrade() {
            Some(subscriber) => {
                callback(&subscriber, payload);
                true
            }
            None => false,
        });
        self.attach_entry(callback, Some(addr))
    }

    fn attach_entry(
        &self,
        callback: Arc<ListenerFn<P>>,
        subscriber: Option<usize>,
    ) -> Result<ListenerHandle> {
        let (key, count, limit) = {
            let mut registry = self.core.registry.lock();
            if registry.torn_down {
                return Err(SignalError::TornDown {
                    signal: self.label().to_owned(),
                });
            }
            let key = registry.entries.insert(ListenerEntry {
                callback,
                subscriber,
            });
            registry.order.push(key);
            (key, registry.order.len(), registry.max_listeners)
        };
        if count > limit {
            warn!(
                signal = self.label(),
                listeners = count,
                limit,
                "listener count exceeds high-water mark"
            );
        }
        trace!(signal = self.label(), listeners = count, "listener attached");
        Ok(ListenerHandle::new(self.core.id, key))
    }

    /// Remove the listener behind `handle` if it is still present.
    ///
    /// Safe to call at any time, including from inside a listener currently
    /// running as part of a fire. Stale, duplicate, and foreign handles are
    /// ignored.
    pub fn detach(&self, handle: ListenerHandle) {
        if handle.signal_id() != self.core.id {
            trace!(signal = self.label(), "detach with foreign handle ignored");
            return;
        }
        if self.remove(handle.key()) {
            trace!(signal = self.label(), "listener detached");
        }
    }

    /// Remove every listener that was attached via [`attach_weak`] with
    /// `subscriber`. Returns how many entries were removed.
    ///
    /// Listeners attached with plain [`attach`] are never matched.
    ///
    /// [`attach_weak`]: Signal::attach_weak
    /// [`attach`]: Signal::attach
    pub fn detach_subscriber<S>(&self, subscriber: &Arc<S>) -> usize {
        let addr = Arc::as_ptr(subscriber) as usize;
        let removed = {
            let mut registry = self.core.registry.lock();
            let stale: Vec<ListenerKey> = registry
                .entries
                .iter()
                .filter(|(_, entry)| entry.subscriber == Some(addr))
                .map(|(key, _)| key)
                .collect();
            for key in &stale {
                registry.remove(*key);
            }
            stale.len()
        };
        if removed > 0 {
            trace!(
                signal = self.label(),
                removed,
                "subscriber listeners detached"
            );
        }
        removed
    }

    fn remove(&self, key: ListenerKey) -> bool {
        self.core.registry.lock().remove(key)
    }

    // -----------------------------------------------------------------------
    // Fire
    // -----------------------------------------------------------------------

    /// Deliver `payload` by reference to every listener present in the
    /// registry right now, in attachment order.
    ///
    /// The order list is snapshotted up front; each entry's liveness is
    /// re-checked just before its callback runs, with the lock released
    /// during the call itself. Listeners attached mid-fire wait for the
    /// next fire; listeners detached mid-fire are skipped. A listener panic
    /// propagates immediately and the rest of the snapshot is not invoked.
    ///
    /// Fails with [`SignalError::TornDown`] once the signal's owner has
    /// torn it down.
    pub fn fire(&self, payload: P) -> Result<()> {
        let snapshot: Vec<ListenerKey> = {
            let registry = self.core.registry.lock();
            if registry.torn_down {
                return Err(SignalError::TornDown {
                    signal: self.label().to_owned(),
                });
            }
            registry.order.clone()
        };
        trace!(signal = self.label(), listeners = snapshot.len(), "fire");

        for key in snapshot {
            let callback = {
                let registry = self.core.registry.lock();
                if registry.torn_down {
                    debug!(signal = self.label(), "torn down mid-fire; delivery aborted");
                    break;
                }
                registry
                    .entries
                    .get(key)
                    .map(|entry| Arc::clone(&entry.callback))
            };
            let Some(callback) = callback else {
                continue;
            };
            // Lock is released — the listener may re-enter attach/detach/fire.
            if !callback(&payload) {
                self.remove(key);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Introspection / lifecycle
    // -----------------------------------------------------------------------

    /// Number of currently attached listeners.
    ///
    /// A point-in-time value for tests and introspection; not stable across
    /// concurrent mutation.
    pub fn listener_count(&self) -> usize {
        self.core.registry.lock().order.len()
    }

    /// Replace the high-water mark used by the attach warning.
    pub fn set_max_listeners(&self, limit: usize) {
        self.core.registry.lock().max_listeners = limit;
    }

    /// Irreversibly invalidate the signal: every listener entry is dropped
    /// and later `attach`/`fire` calls fail with [`SignalError::TornDown`].
    ///
    /// Idempotent. Observed mid-fire, it aborts delivery to the rest of
    /// that fire's snapshot.
    pub fn teardown(&self) {
        let mut registry = self.core.registry.lock();
        if registry.torn_down {
            return;
        }
        registry.torn_down = true;
        let dropped = registry.order.len();
        registry.entries.clear();
        registry.order.clear();
        debug!(signal = self.label(), dropped, "signal torn down");
    }

    /// Whether `teardown` has run on this signal.
    pub fn is_torn_down(&self) -> bool {
        self.core.registry.lock().torn_down
    }
}
