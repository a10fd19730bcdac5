//! signal_type! — the signal-type generator.
//!
//! Hand-writing one payload struct and one wrapper per event shape is pure
//! boilerplate; the macro takes a shape declaration and produces both, with
//! `fire` taking the declared fields as arguments in declared order. A field
//! declared `Option<T>` is independently nullable: `None` means genuinely
//! absent, distinguishable by every listener from any present value.

/// Generate a payload type and a matching signal type from one declaration.
///
/// ```text
/// signal_type! {
///     /// Doc comment for the signal type.
///     pub NameSignal(NamePayload) {
///         field: Type,
///         optional_field: Option<Type>,
///     }
/// }
/// ```
///
/// This expands to:
///
/// - `NamePayload` — a struct with the declared public fields in declared
///   order, deriving `Debug` and `Clone` (field types must support both).
/// - `NameSignal` — a wrapper holding a [`Signal<NamePayload>`], created by
///   `new()` with the type's name as its diagnostic name. It adds an
///   inherent `fire(field, ...)` taking the declared fields as arguments
///   and derefs to the generic signal for `attach`, `detach`,
///   `listener_count`, `teardown`, and the rest of the contract.
///
/// [`Signal<NamePayload>`]: crate::Signal
///
/// # Example
///
/// ```
/// beacon::signal_type! {
///     /// Fired once per completed scan.
///     pub ScanSignal(ScanPayload) {
///         path: String,
///         error: Option<String>,
///     }
/// }
///
/// let scan = ScanSignal::new();
/// let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
/// let sink = std::sync::Arc::clone(&seen);
/// scan.attach(move |payload: &ScanPayload| {
///     sink.lock()
///         .unwrap()
///         .push((payload.path.clone(), payload.error.clone()));
/// })?;
/// scan.fire("/tmp/a".to_owned(), None)?;
/// assert_eq!(
///     seen.lock().unwrap().as_slice(),
///     &[("/tmp/a".to_owned(), None)]
/// );
/// # Ok::<(), beacon::SignalError>(())
/// ```
#[macro_export]
macro_rules! signal_type {
    (
        $(#[$meta:meta])*
        $vis:vis $signal:ident ( $payload:ident ) {
            $( $(#[$field_meta:meta])* $field:ident : $field_ty:ty ),* $(,)?
        }
    ) => {
        #[doc = concat!("Payload carried by one fire of [`", stringify!($signal), "`].")]
        #[derive(Debug, Clone)]
        $vis struct $payload {
            $( $(#[$field_meta])* pub $field: $field_ty, )*
        }

        $(#[$meta])*
        $vis struct $signal {
            inner: $crate::Signal<$payload>,
        }

        impl $signal {
            #[doc = concat!("Create the signal, named `", stringify!($signal), "` for diagnostics.")]
            $vis fn new() -> Self {
                Self {
                    inner: $crate::Signal::named(stringify!($signal)),
                }
            }

            /// Fire with the declared fields, in declared order.
            ///
            /// Fails once the signal has been torn down.
            $vis fn fire(&self, $( $field: $field_ty ),*) -> $crate::Result<()> {
                self.inner.fire($payload { $( $field ),* })
            }
        }

        impl ::core::ops::Deref for $signal {
            type Target = $crate::Signal<$payload>;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::core::default::Default for $signal {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
