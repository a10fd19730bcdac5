//! Typed in-process signals.
//!
//! A [`Signal`] is a typed event channel: an owner exposes it, interested
//! parties [`attach`] listener callbacks, and the owner [`fire`]s it with a
//! payload that every currently attached listener receives synchronously,
//! in attachment order. Attach and detach are safe at any time, including
//! from inside a listener running as part of a fire.
//!
//! ```
//! use beacon::Signal;
//!
//! let signal: Signal<String> = Signal::named("on_message");
//! let handle = signal.attach(|message: &String| println!("{message}"))?;
//! signal.fire("hello".to_owned())?;
//! signal.detach(handle);
//! # Ok::<(), beacon::SignalError>(())
//! ```
//!
//! Event shapes with named, independently nullable fields are declared with
//! [`signal_type!`]; owners with several event kinds compose their signals
//! into a [`SignalBundle`] so teardown invalidates every listener at once.
//!
//! [`attach`]: Signal::attach
//! [`fire`]: Signal::fire

pub mod dispatch;
pub mod error;
pub mod shapes;

mod macros;

pub use dispatch::{ListenerHandle, ListenerKey, Signal, SignalBundle, DEFAULT_MAX_LISTENERS};
pub use error::{Result, SignalError};
pub use shapes::{EmptyPayload, EmptySignal, IntegerPayload, IntegerSignal};
