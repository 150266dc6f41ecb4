//! Runtime integration tests: the three pallets driven together
//! through the `Runtime` aggregate, rather than each pallet's own
//! `mock.rs` harness.

#[cfg(test)]
pub mod liquidation_queue_integration;
