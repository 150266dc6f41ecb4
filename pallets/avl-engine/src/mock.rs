use crate as pallet_avl_engine;
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
    AvlEngine: pallet_avl_engine,
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

impl pallet_avl_engine::Config for Test {
  /// The liquidation-queue pallet would wire this to a burrow id; for
  /// these tests any `Member` type works, so a bare `u64` suffices.
  type Payload = u64;
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  t.into()
}
