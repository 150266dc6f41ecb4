use crate::{Runtime, RuntimeEvent};

impl pallet_amm::Config for Runtime {
  type RuntimeEvent = RuntimeEvent;
  type WeightInfo = ();
}
