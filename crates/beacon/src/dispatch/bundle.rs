//! SignalBundle — owner-side teardown set.
//!
//! An owner that raises several kinds of events composes one named signal
//! per kind, all created eagerly in its constructor, and registers each with
//! a bundle. Tearing the bundle down (explicitly or by dropping it) tears
//! down every member signal, so no listener can be invoked after the owner
//! is gone.

use parking_lot::Mutex;
use tracing::debug;

use super::signal::Signal;

/// Owned teardown thunk for one bundle member.
type TeardownFn = Box<dyn Fn() + Send + Sync>;

struct BundleMembers {
    teardowns: Vec<TeardownFn>,
    torn_down: bool,
}

/// A fixed set of signals sharing the owner's lifetime.
///
/// Members are registered at construction of the owning object and cannot
/// be replaced or removed individually; the only lifecycle operation is
/// [`teardown`], which also runs on `Drop`.
///
/// [`teardown`]: SignalBundle::teardown
pub struct SignalBundle {
    members: Mutex<BundleMembers>,
}

impl SignalBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self {
            members: Mutex::new(BundleMembers {
                teardowns: Vec::new(),
                torn_down: false,
            }),
        }
    }

    /// Register `signal` as a member of this bundle.
    ///
    /// If the bundle was already torn down, the signal is torn down
    /// immediately instead of joining.
    pub fn add<P: 'static>(&self, signal: &Signal<P>) {
        let member = signal.clone();
        let mut members = self.members.lock();
        if members.torn_down {
            member.teardown();
            return;
        }
        members.teardowns.push(Box::new(move || member.teardown()));
    }

    /// Tear down every member signal. Idempotent.
    pub fn teardown(&self) {
        let teardowns = {
            let mut members = self.members.lock();
            if members.torn_down {
                return;
            }
            members.torn_down = true;
            std::mem::take(&mut members.teardowns)
        };
        debug!(members = teardowns.len(), "bundle teardown");
        for teardown in &teardowns {
            teardown();
        }
    }

    /// Whether `teardown` has run on this bundle.
    pub fn is_torn_down(&self) -> bool {
        self.members.lock().torn_down
    }
}

impl Default for SignalBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SignalBundle {
    fn drop(&mut self) {
        self.teardown();
    }
}
