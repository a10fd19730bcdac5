//! Signal shapes common enough to ship predefined. Everything else is
//! declared at the use site with [`signal_type!`](crate::signal_type).

crate::signal_type! {
    /// Signal carrying no payload fields.
    pub EmptySignal(EmptyPayload) {}
}

crate::signal_type! {
    /// Signal carrying a single integer.
    pub IntegerSignal(IntegerPayload) {
        value: i64,
    }
}
