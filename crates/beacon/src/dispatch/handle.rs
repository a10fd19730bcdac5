//! Listener identity — generational registry keys and the opaque handle
//! returned by `attach`.

use slotmap::new_key_type;

new_key_type! {
    /// Generational key for one listener entry inside a signal's registry.
    ///
    /// The key carries both slot index and generation, so a key left over
    /// from a detached listener can never alias an entry that later reuses
    /// the same slot.
    pub struct ListenerKey;
}

/// The capability returned by `attach`, used to detach that one listener.
///
/// A handle is scoped to the signal that issued it and is always safe to
/// hold: detaching via a handle that was already detached, that belongs to
/// another signal, or whose signal was torn down is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle {
    signal_id: u64,
    key: ListenerKey,
}

impl ListenerHandle {
    pub(crate) fn new(signal_id: u64, key: ListenerKey) -> Self {
        Self { signal_id, key }
    }

    pub(crate) fn signal_id(&self) -> u64 {
        self.signal_id
    }

    pub(crate) fn key(&self) -> ListenerKey {
        self.key
    }
}
