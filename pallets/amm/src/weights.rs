#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};

/// Weight functions for `pallet_amm`.
pub trait WeightInfo {
	fn buy_kit() -> Weight;
	fn sell_kit() -> Weight;
	fn buy_liquidity() -> Weight;
	fn sell_liquidity() -> Weight;
}

/// Weights for `pallet_amm` using the Substrate node and recommended
/// hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn buy_kit() -> Weight {
		Weight::from_parts(15_000_000, 0)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn sell_kit() -> Weight {
		Weight::from_parts(15_000_000, 0)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn buy_liquidity() -> Weight {
		Weight::from_parts(20_000_000, 0)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn sell_liquidity() -> Weight {
		Weight::from_parts(20_000_000, 0)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
}

/// For tests and benchmark-less runtimes.
impl WeightInfo for () {
	fn buy_kit() -> Weight {
		Weight::from_parts(15_000_000, 0)
	}
	fn sell_kit() -> Weight {
		Weight::from_parts(15_000_000, 0)
	}
	fn buy_liquidity() -> Weight {
		Weight::from_parts(20_000_000, 0)
	}
	fn sell_liquidity() -> Weight {
		Weight::from_parts(20_000_000, 0)
	}
}
