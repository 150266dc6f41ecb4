//! Protocol constants.
//!
//! These are fixed at genesis and do not vary; they are exposed as `fn`s
//! returning `Ratio` rather than `const` values because `Ratio` carries a
//! heap-allocated `BigInt` and cannot be built in a `const` context. Each
//! pallet's `Config` wires one of these into a `parameter_types!` `Get`
//! implementation, the same way the teacher's runtime wires
//! `ecosystem::params` constants into its pallets.

use crate::ratio::Ratio;
use num_bigint::BigInt;

/// Seconds in a non-leap year, used to annualise the burrow-fee and
/// imbalance accumulator rates.
pub const SECONDS_IN_A_YEAR: i64 = 365 * 24 * 3600;

/// Seconds in a day, the unit `drift'`'s magnitude constants are quoted
/// against.
pub const SECONDS_IN_A_DAY: i64 = 24 * 3600;

/// `ε` bounding the protected index's per-tick relative movement to
/// `exp(±ε·Δt)`.
pub fn protected_index_epsilon() -> Ratio {
  // 0.0005 per second.
  Ratio::new(BigInt::from(5), BigInt::from(10_000)).expect("10_000 != 0")
}

/// Lower bracket for `target`'s deviation from 1, used by
/// `compute_drift_derivative`.
pub fn target_low_bracket() -> Ratio {
  Ratio::new(BigInt::from(5), BigInt::from(1_000)).expect("1_000 != 0")
}

/// Upper bracket for `target`'s deviation from 1, used by
/// `compute_drift_derivative`.
pub fn target_high_bracket() -> Ratio {
  Ratio::new(BigInt::from(5), BigInt::from(100)).expect("100 != 0")
}

/// Annualised burrow-fee rate (0.5%).
pub fn burrow_fee_percentage() -> Ratio {
  Ratio::new(BigInt::from(5), BigInt::from(1_000)).expect("1_000 != 0")
}

/// Numerator of the AMM's constant-product fee, `998 / 1000` meaning a
/// 0.2% fee.
pub const AMM_FEE_NUMERATOR: i64 = 998;
pub const AMM_FEE_DENOMINATOR: i64 = 1000;

/// The mild, moderate, and severe `drift'` magnitudes from §4.4 step 2,
/// expressed per `seconds_in_a_day^2`.
pub fn drift_derivative_mild() -> Ratio {
  drift_derivative_per_day_squared(1, 10_000)
}

pub fn drift_derivative_severe() -> Ratio {
  drift_derivative_per_day_squared(5, 10_000)
}

fn drift_derivative_per_day_squared(numerator: i64, denominator: i64) -> Ratio {
  let per_day_squared = Ratio::new(BigInt::from(numerator), BigInt::from(denominator))
    .expect("denominator != 0");
  let day_squared = Ratio::from_int(SECONDS_IN_A_DAY).mul(&Ratio::from_int(SECONDS_IN_A_DAY));
  per_day_squared
    .div(&day_squared)
    .expect("seconds_in_a_day^2 != 0")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn brackets_are_ordered() {
    assert!(target_low_bracket().lt(&target_high_bracket()));
  }

  #[test]
  fn fee_fraction_is_below_one() {
    let fee = Ratio::new(BigInt::from(AMM_FEE_NUMERATOR), BigInt::from(AMM_FEE_DENOMINATOR))
      .unwrap();
    assert!(fee.lt(&Ratio::one()));
  }

  #[test]
  fn mild_drift_is_smaller_than_severe() {
    assert!(drift_derivative_mild().lt(&drift_derivative_severe()));
  }
}
