#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};

/// Weight functions for `pallet_parameter_controller`.
pub trait WeightInfo {
	fn touch() -> Weight;
}

/// Weights for `pallet_parameter_controller` using the Substrate node
/// and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn touch() -> Weight {
		Weight::from_parts(30_000_000, 0)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
}

/// For tests and benchmark-less runtimes.
impl WeightInfo for () {
	fn touch() -> Weight {
		Weight::from_parts(30_000_000, 0)
	}
}
