use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::traits::EnsureOrigin;
use primitives::{RatioInput, Tez, Timestamp};

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn touch() {
    let origin =
      T::OracleOrigin::try_successful_origin().expect("OracleOrigin must have a successful origin");

    #[extrinsic_call]
    touch(origin, Timestamp::from_unix_seconds(3_600), Tez::of_int(1), RatioInput::new(1, 1));

    assert_eq!(CurrentParameters::<T>::get().last_touched, Timestamp::from_unix_seconds(3_600));
  }
}
