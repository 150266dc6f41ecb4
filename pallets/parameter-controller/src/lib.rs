//! Per-tick parameter controller (spec §4.4): protected index, drift,
//! drift derivative, `q`, `target`, and the burrow-fee/imbalance
//! accumulator indices. `touch` is the system's single entry point;
//! this pallet is the thinnest possible dispatchable shell around the
//! pure [`controller::touch`] function, the same separation the
//! teacher keeps between `pallet-token-minting-curve`'s dispatchables
//! and its pure `calculate_user_receives` helper.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
pub mod controller;
pub mod types;
pub mod weights;
pub use types::Parameters;
pub use weights::WeightInfo;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub mod tests;

use frame::prelude::*;
use primitives::{ArithError, Kit, RatioInput, Tez, Timestamp};

/// The controller's only dependency on the rest of the workspace: a way
/// to push accrued kit into the AMM (spec §4.5 `add_accrued_kit`).
/// Kept as a trait rather than a hard dependency on `pallet-amm`'s
/// concrete type, mirroring the teacher's `AssetConversionApi`
/// abstraction in `pallet-treasury-owned-liquidity` — the runtime wires
/// the concrete implementation in `runtime/src/configs`.
pub trait AmmInterface {
  fn add_accrued_kit(kit: Kit);
}

#[frame::pallet]
pub mod pallet {
  use super::*;

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

    /// The AMM collaborator `touch` forwards kit accrual to.
    type Amm: AmmInterface;

    /// Who may call `touch`; in production this is the trusted
    /// off-chain oracle relayer (spec §2 "an external caller"), not a
    /// user-facing extrinsic.
    type OracleOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  #[pallet::storage_version(STORAGE_VERSION)]
  pub struct Pallet<T>(_);

  const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

  /// The current `Parameters` record, replaced wholesale by every
  /// `touch` (spec §3 "Lifecycles").
  #[pallet::storage]
  pub type CurrentParameters<T: Config> = StorageValue<_, Parameters, ValueQuery>;

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    /// Unix-seconds genesis timestamp, plain `u64` rather than
    /// [`Timestamp`] so the `serde` derive the genesis-config macro
    /// needs doesn't have to be threaded through the numeric substrate.
    pub genesis_timestamp: u64,
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      let now = Timestamp::from_unix_seconds(self.genesis_timestamp);
      CurrentParameters::<T>::put(Parameters::make_initial(now));
    }
  }

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    ParametersUpdated {
      target: primitives::FixedPoint,
      drift: primitives::FixedPoint,
      drift_derivative: primitives::FixedPoint,
      burrow_fee_index: primitives::FixedPoint,
      imbalance_index: primitives::FixedPoint,
      accrual: Kit,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// `touch`'s step-5 `target` came out `<= 0` — a programming-error
    /// precondition violation (spec §4.4/§7), rejected here rather than
    /// left to abort deeper in the numeric substrate.
    NonPositiveTarget,
    /// `now < last_touched`, violating `touch`'s `Δt >= 0` precondition.
    NegativeTimeDelta,
    /// A ratio-to-fixed-point conversion or intermediate division
    /// overflowed or divided by zero.
    ArithmeticFailure,
  }

  impl<T> From<ArithError> for Error<T> {
    fn from(e: ArithError) -> Self {
      match e {
        ArithError::NegativeResult => Error::<T>::NegativeTimeDelta,
        ArithError::DivideByZero | ArithError::Overflow => Error::<T>::ArithmeticFailure,
      }
    }
  }

  impl<T> From<controller::ControllerError> for Error<T> {
    fn from(e: controller::ControllerError) -> Self {
      match e {
        controller::ControllerError::NonPositiveTarget => Error::<T>::NonPositiveTarget,
        controller::ControllerError::Arith(e) => Error::<T>::from(e),
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Computes the new `Parameters` for `now`, writes them back,
    /// forwards the kit accrual to `Config::Amm`, and deposits
    /// `ParametersUpdated`.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::touch())]
    pub fn touch(
      origin: OriginFor<T>,
      now: Timestamp,
      oracle_index: Tez,
      kit_price_in_coin: RatioInput,
    ) -> DispatchResult {
      T::OracleOrigin::ensure_origin(origin)?;

      let kit_price_in_coin = kit_price_in_coin
        .into_ratio()
        .map_err(|e| DispatchError::from(Error::<T>::from(e)))?;
      let params = CurrentParameters::<T>::get();
      let (accrual, new_params) =
        controller::touch(now, oracle_index, &kit_price_in_coin, &params)
          .map_err(|e| DispatchError::from(Error::<T>::from(e)))?;

      CurrentParameters::<T>::put(new_params);
      T::Amm::add_accrued_kit(accrual);

      log::debug!(
        target: "parameter-controller",
        "touch: target={:?} drift={:?} accrual={:?}",
        new_params.target, new_params.drift, accrual,
      );
      Self::deposit_event(Event::ParametersUpdated {
        target: new_params.target,
        drift: new_params.drift,
        drift_derivative: new_params.drift_derivative,
        burrow_fee_index: new_params.burrow_fee_index,
        imbalance_index: new_params.imbalance_index,
        accrual,
      });
      Ok(())
    }
  }
}
