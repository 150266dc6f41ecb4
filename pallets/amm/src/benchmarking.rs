use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{Kit, Tez, Timestamp};

fn seed<T: Config>() {
  Pool::<T>::put(PoolState {
    coin_balance: Tez::of_int(1_000_000),
    kit_balance: Kit::of_int(1_000_000),
    lp_token_supply: 1_000_000,
  });
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn buy_kit() {
    seed::<T>();
    let caller: T::AccountId = whitelisted_caller();
    let now = Timestamp::from_unix_seconds(0);
    let deadline = Timestamp::from_unix_seconds(u64::MAX);

    #[extrinsic_call]
    buy_kit(RawOrigin::Signed(caller), Tez::of_int(100), Kit::ZERO, now, deadline);

    assert!(Pool::<T>::get().kit_balance.to_fixed().to_raw() < Kit::of_int(1_000_000).to_fixed().to_raw());
  }

  #[benchmark]
  fn sell_kit() {
    seed::<T>();
    let caller: T::AccountId = whitelisted_caller();
    let now = Timestamp::from_unix_seconds(0);
    let deadline = Timestamp::from_unix_seconds(u64::MAX);

    #[extrinsic_call]
    sell_kit(RawOrigin::Signed(caller), Kit::of_int(100), Tez::ZERO, now, deadline);

    assert!(Pool::<T>::get().coin_balance.to_fixed().to_raw() < Tez::of_int(1_000_000).to_fixed().to_raw());
  }

  #[benchmark]
  fn buy_liquidity() {
    seed::<T>();
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    buy_liquidity(RawOrigin::Signed(caller), Tez::of_int(100), Kit::of_int(100));

    assert!(Pool::<T>::get().lp_token_supply > 1_000_000);
  }

  #[benchmark]
  fn sell_liquidity() {
    seed::<T>();
    let caller: T::AccountId = whitelisted_caller();
    LpBalances::<T>::insert(&caller, 1_000u128);

    #[extrinsic_call]
    sell_liquidity(RawOrigin::Signed(caller), 500);

    assert!(Pool::<T>::get().lp_token_supply < 1_000_000);
  }
}
