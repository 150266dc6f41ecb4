//! Constant-product coin/kit pool — the parameter controller's external
//! AMM collaborator (spec §4.5/§6).
//!
//! The pool holds a single `(Tez, Kit)` reserve pair and a pro-rata
//! liquidity-token supply. Every swap and liquidity operation commits
//! fully or leaves the pool untouched: an `Err` return never partially
//! mutates `Pool`, matching §7's "an AMM operation either commits fully
//! or returns an error variant; the caller receives the old AMM back
//! untouched." Wallet-/ledger-level balance transfers are a declared
//! non-goal (spec §1), so reserves here are plain accounting balances
//! rather than amounts backed by a `Currency`/`fungibles` pallet — the
//! same simplification the teacher's `pallet-treasury-owned-liquidity`
//! makes for its own internal bucket ledgers.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
pub mod types;
pub mod weights;
pub use types::PoolState;
pub use weights::WeightInfo;

use frame::prelude::*;
use primitives::{constants, ArithError, Kit, Ratio, Tez, Timestamp};

#[frame::pallet]
pub mod pallet {
  use super::*;

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  #[pallet::storage_version(STORAGE_VERSION)]
  pub struct Pallet<T>(_);

  const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

  /// The pool's reserves and outstanding liquidity-token supply.
  #[pallet::storage]
  pub type Pool<T: Config> = StorageValue<_, PoolState, ValueQuery>;

  /// Per-account liquidity-token balances. The teacher tracks bucket
  /// shares the same way, as a plain `StorageMap` rather than a
  /// `fungibles`-backed asset, since minting a real transferable asset
  /// is outside this pallet's scope.
  #[pallet::storage]
  pub type LpBalances<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    KitBought { who: T::AccountId, coin_in: Tez, kit_out: Kit },
    KitSold { who: T::AccountId, kit_in: Kit, coin_out: Tez },
    LiquidityAdded { who: T::AccountId, tokens_minted: u128, coin_in: Tez, kit_in: Kit },
    LiquidityRemoved { who: T::AccountId, tokens_burned: u128, coin_out: Tez, kit_out: Kit },
    KitAccrued { kit: Kit },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// `now > deadline` at the time of the call.
    Expired,
    /// `buy_kit`'s computed `kit_out` fell below the caller's `min_kit`.
    TooLittleKit,
    /// `sell_kit`'s computed `coin_out` fell below the caller's `min_coin`.
    TooLittleCoin,
    /// Either reserve is zero; there is nothing to quote a price against.
    EmptyPool,
    /// An intermediate computation over or underflowed a fixed-width type.
    Overflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// `kit_out = floor( coin_in * kit * 998 / (coin * 1000 + coin_in * 998) )`.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::buy_kit())]
    pub fn buy_kit(
      origin: OriginFor<T>,
      coin_in: Tez,
      min_kit: Kit,
      now: Timestamp,
      deadline: Timestamp,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(now <= deadline, Error::<T>::Expired);
      let pool = Pool::<T>::get();
      ensure!(!pool.coin_balance.is_zero() && !pool.kit_balance.is_zero(), Error::<T>::EmptyPool);

      let kit_out = Kit::from_fixed(Self::quote_out(
        pool.coin_balance.to_fixed(),
        pool.kit_balance.to_fixed(),
        coin_in.to_fixed(),
      )?);
      ensure!(kit_out >= min_kit, Error::<T>::TooLittleKit);

      Pool::<T>::put(PoolState {
        coin_balance: pool.coin_balance.add(coin_in),
        kit_balance: pool.kit_balance.sub(kit_out),
        lp_token_supply: pool.lp_token_supply,
      });
      log::debug!(target: "amm", "buy_kit: coin_in={coin_in:?} kit_out={kit_out:?}");
      Self::deposit_event(Event::KitBought { who, coin_in, kit_out });
      Ok(())
    }

    /// `coin_out = floor( kit_in * coin * 998 / (kit * 1000 + kit_in * 998) )`.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::sell_kit())]
    pub fn sell_kit(
      origin: OriginFor<T>,
      kit_in: Kit,
      min_coin: Tez,
      now: Timestamp,
      deadline: Timestamp,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(now <= deadline, Error::<T>::Expired);
      let pool = Pool::<T>::get();
      ensure!(!pool.coin_balance.is_zero() && !pool.kit_balance.is_zero(), Error::<T>::EmptyPool);

      let coin_out = Tez::from_fixed(Self::quote_out(
        pool.kit_balance.to_fixed(),
        pool.coin_balance.to_fixed(),
        kit_in.to_fixed(),
      )?);
      ensure!(coin_out >= min_coin, Error::<T>::TooLittleCoin);

      Pool::<T>::put(PoolState {
        coin_balance: pool.coin_balance.sub(coin_out),
        kit_balance: pool.kit_balance.add(kit_in),
        lp_token_supply: pool.lp_token_supply,
      });
      log::debug!(target: "amm", "sell_kit: kit_in={kit_in:?} coin_out={coin_out:?}");
      Self::deposit_event(Event::KitSold { who, kit_in, coin_out });
      Ok(())
    }

    /// Mints liquidity tokens for `(coin, kit)`. On a fresh (zero-supply)
    /// pool the offered pair seeds the initial price and mints one
    /// token per whole unit of `coin` offered. Otherwise mints
    /// `floor(n * coin / coin_balance)` tokens, the ratio-preserving
    /// amount spec §6 names, and refunds whichever side was offered
    /// beyond what that ratio needs in full.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::buy_liquidity())]
    pub fn buy_liquidity(origin: OriginFor<T>, coin: Tez, kit: Kit) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let pool = Pool::<T>::get();

      let (tokens_minted, coin_used, kit_used, new_pool) = if pool.is_empty() {
        let tokens = Self::whole_units(coin)?;
        ensure!(tokens > 0, Error::<T>::Overflow);
        (
          tokens,
          coin,
          kit,
          PoolState { coin_balance: coin, kit_balance: kit, lp_token_supply: tokens },
        )
      } else {
        let coin_r = Ratio::from_fixed_point(pool.coin_balance.to_fixed());
        let kit_r = Ratio::from_fixed_point(pool.kit_balance.to_fixed());
        let offered_coin_r = Ratio::from_fixed_point(coin.to_fixed());
        let offered_kit_r = Ratio::from_fixed_point(kit.to_fixed());

        // The side that would require less of the other to stay in
        // ratio is the "shorter" side; the other is refunded in full.
        let kit_needed_for_coin = offered_coin_r.mul(&kit_r).div(&coin_r).map_err(|_| Error::<T>::EmptyPool)?;
        let (coin_used_r, kit_used_r) = if kit_needed_for_coin.le(&offered_kit_r) {
          (offered_coin_r.clone(), kit_needed_for_coin)
        } else {
          let coin_needed_for_kit =
            offered_kit_r.mul(&coin_r).div(&kit_r).map_err(|_| Error::<T>::EmptyPool)?;
          (coin_needed_for_kit, offered_kit_r.clone())
        };

        let supply_r = Ratio::from_int(pool.lp_token_supply as i64);
        let tokens_r = supply_r.mul(&coin_used_r).div(&coin_r).map_err(|_| Error::<T>::EmptyPool)?;
        let tokens = tokens_r
          .floor()
          .map_err(|_| Error::<T>::Overflow)?
          .to_raw()
          .checked_shr(primitives::fixed_point::SCALE_EXPONENT)
          .ok_or(Error::<T>::Overflow)? as u128;
        ensure!(tokens > 0, Error::<T>::Overflow);

        let coin_used = coin_used_r.floor().map_err(|_| Error::<T>::Overflow)?;
        let coin_used = Tez::from_fixed(coin_used);
        let kit_used = kit_used_r.floor().map_err(|_| Error::<T>::Overflow)?;
        let kit_used = Kit::from_fixed(kit_used);

        (
          tokens,
          coin_used,
          kit_used,
          PoolState {
            coin_balance: pool.coin_balance.add(coin_used),
            kit_balance: pool.kit_balance.add(kit_used),
            lp_token_supply: pool.lp_token_supply.saturating_add(tokens),
          },
        )
      };

      Pool::<T>::put(new_pool);
      LpBalances::<T>::mutate(&who, |balance| *balance = balance.saturating_add(tokens_minted));
      log::debug!(target: "amm", "buy_liquidity: tokens_minted={tokens_minted}");
      Self::deposit_event(Event::LiquidityAdded {
        who,
        tokens_minted,
        coin_in: coin_used,
        kit_in: kit_used,
      });
      Ok(())
    }

    /// Redeems `tokens` liquidity tokens pro-rata against the current
    /// reserves.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::sell_liquidity())]
    pub fn sell_liquidity(origin: OriginFor<T>, tokens: u128) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let pool = Pool::<T>::get();
      ensure!(!pool.is_empty(), Error::<T>::EmptyPool);
      let held = LpBalances::<T>::get(&who);
      ensure!(held >= tokens, Error::<T>::Overflow);

      let supply_r = Ratio::from_int(pool.lp_token_supply as i64);
      let share_r = Ratio::from_int(tokens as i64).div(&supply_r).map_err(|_| Error::<T>::EmptyPool)?;
      let coin_r = Ratio::from_fixed_point(pool.coin_balance.to_fixed());
      let kit_r = Ratio::from_fixed_point(pool.kit_balance.to_fixed());

      let coin_out = Tez::from_fixed(
        share_r.mul(&coin_r).floor().map_err(|_| Error::<T>::Overflow)?,
      );
      let kit_out = Kit::from_fixed(
        share_r.mul(&kit_r).floor().map_err(|_| Error::<T>::Overflow)?,
      );

      Pool::<T>::put(PoolState {
        coin_balance: pool.coin_balance.sub(coin_out),
        kit_balance: pool.kit_balance.sub(kit_out),
        lp_token_supply: pool.lp_token_supply.saturating_sub(tokens),
      });
      LpBalances::<T>::mutate(&who, |balance| *balance = balance.saturating_sub(tokens));
      log::debug!(target: "amm", "sell_liquidity: tokens={tokens} coin_out={coin_out:?} kit_out={kit_out:?}");
      Self::deposit_event(Event::LiquidityRemoved { who, tokens_burned: tokens, coin_out, kit_out });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// `kit_in_coin(amm) = coin_balance / kit_balance`, the spot price
    /// the controller reads (spec §6). Callers that need this are
    /// expected to supply a non-empty pool; the parameter controller's
    /// own `touch` never calls it — `kit_price_in_coin` is supplied by
    /// the caller of `touch` instead (spec §4.4) — this is exposed for
    /// completeness of the AMM surface §6 describes.
    pub fn kit_in_coin() -> Result<Ratio, ArithError> {
      let pool = Pool::<T>::get();
      if pool.kit_balance.is_zero() {
        return Err(ArithError::DivideByZero);
      }
      Ratio::from_fixed_point(pool.coin_balance.to_fixed())
        .div(&Ratio::from_fixed_point(pool.kit_balance.to_fixed()))
    }

    /// Increases the kit side without minting liquidity tokens. The
    /// controller's only way of touching this pallet (spec §4.5); not a
    /// dispatchable, since §4.5 names the controller as the sole caller
    /// — mirrors how `pallet-token-minting-curve` keeps
    /// distribution-internal helpers as plain associated functions
    /// rather than extrinsics.
    pub fn add_accrued_kit(kit: Kit) {
      Pool::<T>::mutate(|pool| pool.kit_balance = pool.kit_balance.add(kit));
      log::debug!(target: "amm", "add_accrued_kit: kit={kit:?}");
      Self::deposit_event(Event::KitAccrued { kit });
    }

    /// `out = floor( in * reserve_out * 998 / (reserve_in * 1000 + in * 998) )`,
    /// the shared shape of `buy_kit`'s and `sell_kit`'s formulas, generic
    /// over which side is "in" and which is "out" via the raw
    /// `FixedPoint` each tagged scalar wraps.
    fn quote_out(
      reserve_in: primitives::FixedPoint,
      reserve_out: primitives::FixedPoint,
      amount_in: primitives::FixedPoint,
    ) -> Result<primitives::FixedPoint, Error<T>> {
      let reserve_in_r = Ratio::from_fixed_point(reserve_in);
      let reserve_out_r = Ratio::from_fixed_point(reserve_out);
      let amount_in_r = Ratio::from_fixed_point(amount_in);
      let fee_num = Ratio::from_int(constants::AMM_FEE_NUMERATOR);
      let fee_den = Ratio::from_int(constants::AMM_FEE_DENOMINATOR);

      let numerator = amount_in_r.mul(&reserve_out_r).mul(&fee_num);
      let denominator = reserve_in_r.mul(&fee_den).add(&amount_in_r.mul(&fee_num));
      let quotient = numerator.div(&denominator).map_err(|_| Error::<T>::EmptyPool)?;
      quotient.floor().map_err(|_| Error::<T>::Overflow)
    }

    /// `raw >> SCALE_EXPONENT`, i.e. the integer-unit part of a
    /// `FixedPoint` amount, used only to pick an initial liquidity-token
    /// denomination when seeding an empty pool (there is no existing
    /// ratio to preserve yet).
    fn whole_units(amount: Tez) -> Result<u128, Error<T>> {
      let raw = amount.to_fixed().to_raw();
      let whole = raw.checked_shr(primitives::fixed_point::SCALE_EXPONENT).ok_or(Error::<T>::Overflow)?;
      u128::try_from(whole).map_err(|_| Error::<T>::Overflow)
    }
  }
}

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub mod tests;
