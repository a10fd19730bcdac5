//! Error taxonomy for signal dispatch.
//!
//! Only one condition is surfaced as an `Err`: using a signal after its
//! owner tore it down. The other two failure classes are handled elsewhere
//! by design:
//!
//! - Detaching with a stale, duplicate, or foreign handle is a silent no-op
//!   (detach races are expected and benign).
//! - A panicking listener propagates out of `fire` and aborts delivery to
//!   the rest of that fire's snapshot — no error isolation at this level.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    /// `attach` or `fire` was called on a signal whose owner already tore
    /// it down. This is a contract violation by the caller, not a race to
    /// be absorbed.
    #[error("signal \"{signal}\" is torn down; attach and fire are no longer valid")]
    TornDown { signal: String },
}

/// Convenience alias — the default error type is `SignalError`.
pub type Result<T, E = SignalError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
