//! An exact numerator/denominator pair, kept in lowest terms.
//!
//! The parameter controller chains several multiplications and divisions
//! per `touch`; performing each step in fixed-point would compound
//! rounding error, so every intermediate value in `touch` is a `Ratio`
//! and only the final assignment to a `Parameters` field goes through
//! [`Ratio::floor`]/[`Ratio::ceil`]. The denominator is always positive;
//! the sign lives on the numerator, and `gcd`-reduction keeps the pair in
//! lowest terms after every operation so growth stays bounded across a
//! long chain of multiplications.

use crate::error::ArithError;
use crate::fixed_point::FixedPoint;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use scale_info::TypeInfo;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ratio {
  numerator: BigInt,
  denominator: BigInt,
}

/// A SCALE-encodable carrier for a [`Ratio`] crossing a dispatchable's
/// wire boundary. `Ratio` itself holds an arbitrary-precision `BigInt`
/// pair and has no fixed-width encoding to give it `Parameter`, so a
/// call that needs to accept one (`touch`'s `kit_price_in_coin`) takes
/// a bounded `i128` numerator/denominator pair instead and reconstructs
/// the exact `Ratio` from it — every quantity this protocol's `touch`
/// actually receives fits comfortably within `i128` range.
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
pub struct RatioInput {
  pub numerator: i128,
  pub denominator: i128,
}

impl RatioInput {
  pub fn new(numerator: i128, denominator: i128) -> Self {
    RatioInput { numerator, denominator }
  }

  /// Fails with [`ArithError::DivideByZero`] when `denominator` is zero.
  pub fn into_ratio(self) -> Result<Ratio, ArithError> {
    Ratio::new(BigInt::from(self.numerator), BigInt::from(self.denominator))
  }
}

impl Ratio {
  /// Fails with [`ArithError::DivideByZero`] when `denominator` is zero.
  /// Never produces a zero-denominator `Ratio` otherwise, so every other
  /// constructor on this type is total.
  pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, ArithError> {
    if denominator.is_zero() {
      return Err(ArithError::DivideByZero);
    }
    Ok(Self::reduced(numerator, denominator))
  }

  pub fn from_int(n: i64) -> Self {
    Ratio {
      numerator: BigInt::from(n),
      denominator: BigInt::one(),
    }
  }

  pub fn zero() -> Self {
    Ratio {
      numerator: BigInt::zero(),
      denominator: BigInt::one(),
    }
  }

  pub fn one() -> Self {
    Ratio::from_int(1)
  }

  /// Exact conversion from a `FixedPoint`: `n / 2^64` as a `Ratio`.
  pub fn from_fixed_point(value: FixedPoint) -> Self {
    Ratio::reduced(
      BigInt::from(value.to_raw()),
      BigInt::one() << crate::fixed_point::SCALE_EXPONENT,
    )
  }

  fn reduced(numerator: BigInt, denominator: BigInt) -> Self {
    let (numerator, denominator) = if denominator.is_negative() {
      (-numerator, -denominator)
    } else {
      (numerator, denominator)
    };
    if numerator.is_zero() {
      return Ratio {
        numerator: BigInt::zero(),
        denominator: BigInt::one(),
      };
    }
    let g = numerator.gcd(&denominator);
    Ratio {
      numerator: numerator / &g,
      denominator: denominator / &g,
    }
  }

  pub fn numerator(&self) -> &BigInt {
    &self.numerator
  }

  pub fn denominator(&self) -> &BigInt {
    &self.denominator
  }

  pub fn is_zero(&self) -> bool {
    self.numerator.is_zero()
  }

  pub fn is_negative(&self) -> bool {
    self.numerator.is_negative()
  }

  pub fn is_positive(&self) -> bool {
    self.numerator.is_positive()
  }

  pub fn neg(&self) -> Self {
    Ratio {
      numerator: -self.numerator.clone(),
      denominator: self.denominator.clone(),
    }
  }

  pub fn add(&self, other: &Self) -> Self {
    let numerator =
      &self.numerator * &other.denominator + &other.numerator * &self.denominator;
    let denominator = &self.denominator * &other.denominator;
    Ratio::reduced(numerator, denominator)
  }

  pub fn sub(&self, other: &Self) -> Self {
    self.add(&other.neg())
  }

  pub fn mul(&self, other: &Self) -> Self {
    Ratio::reduced(
      &self.numerator * &other.numerator,
      &self.denominator * &other.denominator,
    )
  }

  /// Fails with [`ArithError::DivideByZero`] when `other` is zero; by
  /// construction a `Ratio`'s own numerator may be zero, so this is the
  /// one place a zero divisor can still occur.
  pub fn div(&self, other: &Self) -> Result<Self, ArithError> {
    if other.is_zero() {
      return Err(ArithError::DivideByZero);
    }
    Ok(Ratio::reduced(
      &self.numerator * &other.denominator,
      &self.denominator * &other.numerator,
    ))
  }

  pub fn recip(&self) -> Result<Self, ArithError> {
    Ratio::one().div(self)
  }

  pub fn pow(&self, n: u32) -> Self {
    let mut acc = Ratio::one();
    for _ in 0..n {
      acc = acc.mul(self);
    }
    acc
  }

  pub fn min(&self, other: &Self) -> Self {
    if self.le(other) { self.clone() } else { other.clone() }
  }

  pub fn max(&self, other: &Self) -> Self {
    if self.ge(other) { self.clone() } else { other.clone() }
  }

  pub fn clamp(&self, lo: &Self, hi: &Self) -> Self {
    self.max(lo).min(hi)
  }

  fn cross(&self, other: &Self) -> (BigInt, BigInt) {
    (
      &self.numerator * &other.denominator,
      &other.numerator * &self.denominator,
    )
  }

  pub fn lt(&self, other: &Self) -> bool {
    let (l, r) = self.cross(other);
    l < r
  }

  pub fn le(&self, other: &Self) -> bool {
    let (l, r) = self.cross(other);
    l <= r
  }

  pub fn gt(&self, other: &Self) -> bool {
    let (l, r) = self.cross(other);
    l > r
  }

  pub fn ge(&self, other: &Self) -> bool {
    let (l, r) = self.cross(other);
    l >= r
  }

  /// Converts to `FixedPoint`, rounding toward negative infinity.
  pub fn floor(&self) -> Result<FixedPoint, ArithError> {
    let scale = BigInt::one() << crate::fixed_point::SCALE_EXPONENT;
    let scaled_numerator = &self.numerator * &scale;
    let raw = scaled_numerator.div_floor(&self.denominator);
    raw.to_i128().map(FixedPoint::from_raw).ok_or(ArithError::Overflow)
  }

  /// Converts to `FixedPoint`, rounding toward positive infinity.
  ///
  /// Defined as `-floor(-x)` rather than "truncate, then bump by one on a
  /// remainder": the bump-by-one shortcut only holds for positive `x`, and
  /// silently rounds too far for a negative one.
  pub fn ceil(&self) -> Result<FixedPoint, ArithError> {
    let negated = self.neg();
    negated.floor().map(FixedPoint::neg)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn r(n: i64, d: i64) -> Ratio {
    Ratio::new(BigInt::from(n), BigInt::from(d)).unwrap()
  }

  #[test]
  fn constructed_in_lowest_terms() {
    let half = r(2, 4);
    assert_eq!(half.numerator(), &BigInt::from(1));
    assert_eq!(half.denominator(), &BigInt::from(2));
  }

  #[test]
  fn negative_denominator_folds_sign_into_numerator() {
    let neg_half = r(1, -2);
    assert!(neg_half.is_negative());
    assert_eq!(neg_half.denominator(), &BigInt::from(2));
  }

  #[test]
  fn zero_denominator_rejected() {
    assert_eq!(
      Ratio::new(BigInt::from(1), BigInt::zero()),
      Err(ArithError::DivideByZero)
    );
  }

  #[test]
  fn exact_arithmetic() {
    let a = r(1, 3);
    let b = r(1, 6);
    assert_eq!(a.add(&b), r(1, 2));
    assert_eq!(a.sub(&b), r(1, 6));
    assert_eq!(a.mul(&b), r(1, 18));
    assert_eq!(a.div(&b).unwrap(), r(2, 1));
  }

  #[test]
  fn floor_and_ceil_diverge_on_inexact_values() {
    let third = r(1, 3);
    let floor = third.floor().unwrap();
    let ceil = third.ceil().unwrap();
    assert!(floor.to_raw() < ceil.to_raw());
    assert_eq!(ceil.to_raw() - floor.to_raw(), 1);
  }

  #[test]
  fn floor_rounds_toward_negative_infinity_for_negatives() {
    let neg_third = r(-1, 3);
    let floor = neg_third.floor().unwrap();
    let ceil = neg_third.ceil().unwrap();
    assert!(floor.to_raw() < ceil.to_raw());
  }

  #[test]
  fn ratio_input_reconstructs_the_exact_ratio() {
    let input = RatioInput::new(3, 8);
    assert_eq!(input.into_ratio().unwrap(), r(3, 8));
  }

  #[test]
  fn ratio_input_rejects_zero_denominator() {
    let input = RatioInput::new(1, 0);
    assert_eq!(input.into_ratio(), Err(ArithError::DivideByZero));
  }

  #[test]
  fn from_fixed_point_round_trips_through_floor() {
    let value = FixedPoint::of_int(3).add(FixedPoint::from_raw(1i128 << 63));
    let ratio = Ratio::from_fixed_point(value);
    assert_eq!(ratio.floor().unwrap(), value);
  }

  #[test]
  fn ordering_matches_cross_multiplication() {
    assert!(r(1, 3).lt(&r(1, 2)));
    assert!(r(1, 2).ge(&r(1, 2)));
    assert_eq!(r(1, 2).max(&r(1, 3)), r(1, 2));
    assert_eq!(r(1, 2).min(&r(1, 3)), r(1, 3));
  }
}
