//! The controller's state record (spec §3 "Parameters record").
//!
//! Replaced wholesale on every `touch` — never partially mutated in
//! place from a semantic standpoint, even though the pallet stores it
//! as a single `StorageValue` and so technically overwrites it in
//! place at the storage layer.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use primitives::{FixedPoint, Kit, Tez, Timestamp};
use scale_info::TypeInfo;

#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub struct Parameters {
  /// Reciprocal of the kit price index, dimensionless.
  pub q: FixedPoint,
  /// Last oracle-observed external index.
  pub index: Tez,
  /// Rate-limited tracking of `index`.
  pub protected_index: Tez,
  /// `q * index / market_kit_price`.
  pub target: FixedPoint,
  /// Integrated drift rate.
  pub drift: FixedPoint,
  /// Instantaneous drift derivative.
  pub drift_derivative: FixedPoint,
  /// Multiplicative accumulator, starts at `1`.
  pub burrow_fee_index: FixedPoint,
  /// Multiplicative accumulator, starts at `1`.
  pub imbalance_index: FixedPoint,
  /// Total kit owed by all burrows.
  pub outstanding_kit: Kit,
  /// Total kit outside of burrows.
  pub circulating_kit: Kit,
  pub last_touched: Timestamp,
}

impl Parameters {
  /// Genesis parameters: `q`, `target`, `burrow_fee_index` and
  /// `imbalance_index` start at `1`; every other accumulator and
  /// monetary total starts at `0`. `index`/`protected_index`/`target`
  /// are placeholders until the first `touch` observes a real oracle
  /// reading — `index`/`protected_index` start at `1` rather than `0`
  /// since step 1 of `touch` divides by `protected_index`.
  pub fn make_initial(now: Timestamp) -> Self {
    Parameters {
      q: FixedPoint::ONE,
      index: Tez::ONE,
      protected_index: Tez::ONE,
      target: FixedPoint::ONE,
      drift: FixedPoint::ZERO,
      drift_derivative: FixedPoint::ZERO,
      burrow_fee_index: FixedPoint::ONE,
      imbalance_index: FixedPoint::ONE,
      outstanding_kit: Kit::ZERO,
      circulating_kit: Kit::ZERO,
      last_touched: now,
    }
  }
}

impl Default for Parameters {
  fn default() -> Self {
    Parameters::make_initial(Timestamp::from_unix_seconds(0))
  }
}
