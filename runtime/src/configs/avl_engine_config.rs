use crate::Runtime;

impl pallet_avl_engine::Config for Runtime {
  /// A liquidation-queue client would set this to its own burrow-id
  /// type; for the integration tests in this workspace a bare `u64` is
  /// enough payload to exercise the engine end to end.
  type Payload = u64;
}
