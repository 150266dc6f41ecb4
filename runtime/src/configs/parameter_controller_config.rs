//! Wires `pallet-parameter-controller`'s `AmmInterface` collaborator to
//! the real `pallet-amm` the same way the teacher's `runtime` wires
//! `pallet-treasury-owned-liquidity`'s `AssetConversionApi` to a
//! concrete `pallet-asset-conversion` implementation — the controller
//! crate never depends on `pallet-amm` directly (spec §4.4 "Config"),
//! only this runtime-level `impl` does.

use crate::{Runtime, RuntimeEvent};
use pallet_parameter_controller::AmmInterface;
use polkadot_sdk::frame_system::EnsureRoot;
use primitives::Kit;

pub struct AmmAdapter;

impl AmmInterface for AmmAdapter {
  fn add_accrued_kit(kit: Kit) {
    pallet_amm::Pallet::<Runtime>::add_accrued_kit(kit);
  }
}

impl pallet_parameter_controller::Config for Runtime {
  type RuntimeEvent = RuntimeEvent;
  type Amm = AmmAdapter;
  /// The trusted off-chain oracle relayer (spec §2); `touch` is not a
  /// user-facing extrinsic, so only root may call it in this
  /// integration harness.
  type OracleOrigin = EnsureRoot<crate::AccountId>;
  type WeightInfo = ();
}
