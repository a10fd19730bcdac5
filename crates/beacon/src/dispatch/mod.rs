//! Signal dispatch — typed event channels with ordered, reentrancy-safe
//! delivery.
//!
//! # Modules
//!
//! - [`signal`] — [`Signal<P>`], the dispatch engine.
//! - [`handle`] — [`ListenerKey`] and [`ListenerHandle`].
//! - [`bundle`] — [`SignalBundle`], the owner-side teardown set.
//!
//! [`Signal<P>`]: signal::Signal

pub mod bundle;
pub mod handle;
pub mod signal;

pub use bundle::SignalBundle;
pub use handle::{ListenerHandle, ListenerKey};
pub use signal::{Signal, DEFAULT_MAX_LISTENERS};
