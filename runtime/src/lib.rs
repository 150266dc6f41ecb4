//! FRAME aggregate wiring `pallet-avl-engine`, `pallet-amm` and
//! `pallet-parameter-controller` together (spec §0 crate layout).
//!
//! This is deliberately not a parachain runtime: the spec's non-goals
//! exclude networking, persistent on-disk storage and any
//! serialisation/CLI layer, so none of the teacher template's
//! `cumulus-*`, XCM, collator/Aura consensus, chain-spec or
//! WASM-builder machinery is carried over (spec §0). What remains is
//! the FRAME analogue of the teacher's per-pallet `mock.rs` harnesses,
//! generalised into a standalone crate so the three pallets can be
//! driven together by `runtime/src/tests/*.rs` the way the teacher's
//! real runtime drives `pallet-token-minting-curve` together with
//! `pallet-treasury-owned-liquidity` in its own integration suite.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod configs;

#[cfg(test)]
mod tests;

use frame::prelude::*;
use polkadot_sdk::frame_support::construct_runtime;
use polkadot_sdk::frame_support::derive_impl;
use polkadot_sdk::sp_runtime::testing::H256;
use polkadot_sdk::sp_runtime::traits::{BlakeTwo256, IdentityLookup};
use polkadot_sdk::sp_runtime::BuildStorage;
use polkadot_sdk::frame_system;

pub type AccountId = u64;
pub type BlockNumber = u32;
pub type Block = frame_system::mocking::MockBlock<Runtime>;

construct_runtime!(
  pub struct Runtime {
    System: frame_system,
    AvlEngine: pallet_avl_engine,
    Amm: pallet_amm,
    ParameterController: pallet_parameter_controller,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Runtime {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
}

pub fn new_test_ext(genesis_timestamp: u64) -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Runtime>::default()
    .build_storage()
    .unwrap();
  pallet_parameter_controller::GenesisConfig::<Runtime> {
    genesis_timestamp,
    _marker: Default::default(),
  }
  .assimilate_storage(&mut t)
  .unwrap();
  t.into()
}
