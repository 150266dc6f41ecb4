use crate as pallet_parameter_controller;
use crate::AmmInterface;
use polkadot_sdk::frame_support::construct_runtime;
use polkadot_sdk::frame_support::derive_impl;
use polkadot_sdk::frame_system;
use polkadot_sdk::frame_system::EnsureRoot;
use polkadot_sdk::sp_runtime::BuildStorage;
use polkadot_sdk::sp_runtime::testing::H256;
use polkadot_sdk::sp_runtime::traits::{BlakeTwo256, IdentityLookup};
use primitives::Kit;
use std::cell::RefCell;

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    ParameterController: pallet_parameter_controller,
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

thread_local! {
  /// Records every `add_accrued_kit` call `MockAmm` receives, so tests
  /// can assert the controller forwarded the right accrual without
  /// pulling in the real `pallet-amm`.
  static ACCRUED: RefCell<Vec<Kit>> = const { RefCell::new(Vec::new()) };
}

pub struct MockAmm;

impl AmmInterface for MockAmm {
  fn add_accrued_kit(kit: Kit) {
    ACCRUED.with(|cell| cell.borrow_mut().push(kit));
  }
}

pub fn accrued_kit() -> Vec<Kit> {
  ACCRUED.with(|cell| cell.borrow().clone())
}

impl pallet_parameter_controller::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Amm = MockAmm;
  type OracleOrigin = EnsureRoot<u64>;
  type WeightInfo = ();
}

/// Builds storage with the pallet's own `ValueQuery` default rather
/// than running its `GenesisConfig` — the `Parameters::default()` the
/// storage falls back to is the same `make_initial` at `t = 0`.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  t.into()
}

/// Builds storage via `GenesisConfig::build`, seeding
/// `CurrentParameters` at an explicit genesis timestamp.
pub fn new_test_ext_with_genesis(genesis_timestamp: u64) -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  pallet_parameter_controller::GenesisConfig::<Test> {
    genesis_timestamp,
    _marker: Default::default(),
  }
  .assimilate_storage(&mut t)
  .unwrap();
  t.into()
}
