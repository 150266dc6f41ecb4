//! Pool state.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use primitives::{Kit, Tez};
use scale_info::TypeInfo;

/// The constant-product pool's reserves and outstanding liquidity-token
/// supply. Wallet-/ledger-level transfer validation is a declared
/// non-goal, so reserves are plain accounting balances rather than
/// amounts backed by a `Currency`/`fungibles` pallet.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub struct PoolState {
  pub coin_balance: Tez,
  pub kit_balance: Kit,
  pub lp_token_supply: u128,
}

impl PoolState {
  pub fn is_empty(&self) -> bool {
    self.lp_token_supply == 0
  }
}
