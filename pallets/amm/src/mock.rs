use crate as pallet_amm;
use polkadot_sdk::frame_support::construct_runtime;
use polkadot_sdk::frame_support::derive_impl;
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::BuildStorage;
use polkadot_sdk::sp_runtime::testing::H256;
use polkadot_sdk::sp_runtime::traits::{BlakeTwo256, IdentityLookup};

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Amm: pallet_amm,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
}

impl pallet_amm::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  t.into()
}
