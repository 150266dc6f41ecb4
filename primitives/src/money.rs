//! `Tez` and `Kit` are both `2^64`-scaled fixed-point scalars but must
//! never be interconvertible by accident — one is the native collateral
//! coin, the other the synthetic debt token, and mixing them up is a
//! category error the type system should catch rather than a bug report.
//! This mirrors the way the teacher's `AssetKind` tags otherwise-identical
//! representations so unrelated asset classes can't be confused at a call
//! site.

use crate::error::ArithError;
use crate::fixed_point::FixedPoint;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

macro_rules! tagged_scalar {
  ($name:ident, $doc:expr) => {
    #[doc = $doc]
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
      Ord,
      PartialEq,
      PartialOrd,
      TypeInfo,
    )]
    pub struct $name(FixedPoint);

    impl $name {
      pub const ZERO: $name = $name(FixedPoint::ZERO);
      pub const ONE: $name = $name(FixedPoint::ONE);

      pub const fn from_fixed(value: FixedPoint) -> Self {
        $name(value)
      }

      pub const fn to_fixed(self) -> FixedPoint {
        self.0
      }

      pub fn of_int(n: i64) -> Self {
        $name(FixedPoint::of_int(n))
      }

      pub fn is_zero(self) -> bool {
        self.0.is_zero()
      }

      pub fn is_negative(self) -> bool {
        self.0.is_negative()
      }

      pub fn add(self, other: Self) -> Self {
        $name(self.0.add(other.0))
      }

      pub fn sub(self, other: Self) -> Self {
        $name(self.0.sub(other.0))
      }

      pub fn mul_scalar(self, scalar: FixedPoint) -> Result<Self, ArithError> {
        self.0.mul(scalar).map($name)
      }

      pub fn div_scalar(self, scalar: FixedPoint) -> Result<Self, ArithError> {
        self.0.div(scalar).map($name)
      }
    }
  };
}

tagged_scalar!(Tez, "The native collateral coin.");
tagged_scalar!(Kit, "The synthetic token minted against collateral.");

impl Kit {
  /// One mukit (micro-kit) is `10^-6` kit.
  pub fn of_mukit(n: i64) -> Self {
    let mukit_scale = FixedPoint::of_int(1_000_000);
    let raw = FixedPoint::of_int(n)
      .div(mukit_scale)
      .expect("1_000_000 is a non-zero FixedPoint divisor");
    Kit(raw)
  }
}

/// Unix-seconds timestamp. `checked_sub` returns an exact, non-negative
/// `Ratio` count of seconds for use as `touch`'s `Δt`.
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
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
)]
pub struct Timestamp(u64);

impl Timestamp {
  pub const fn from_unix_seconds(seconds: u64) -> Self {
    Timestamp(seconds)
  }

  pub const fn to_unix_seconds(self) -> u64 {
    self.0
  }

  /// `self - earlier` as a count of seconds; fails with
  /// [`ArithError::NegativeResult`] if `earlier` is actually later, which
  /// would violate `touch`'s `Δt >= 0` precondition.
  pub fn checked_sub(self, earlier: Self) -> Result<crate::ratio::Ratio, ArithError> {
    if self.0 < earlier.0 {
      return Err(ArithError::NegativeResult);
    }
    Ok(crate::ratio::Ratio::from_int((self.0 - earlier.0) as i64))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tez_and_kit_are_not_interconvertible() {
    // This test exists to document the invariant: there is no `From<Tez>
    // for Kit` (or vice versa) to attempt in the first place.
    let tez = Tez::of_int(5);
    let kit = Kit::of_int(5);
    assert_eq!(tez.to_fixed(), kit.to_fixed());
  }

  #[test]
  fn mukit_constructor() {
    let one_mukit = Kit::of_mukit(1);
    let one_kit = Kit::of_int(1);
    // 1 mukit = 10^-6 kit.
    assert_eq!(one_mukit.mul_scalar(FixedPoint::of_int(1_000_000)).unwrap(), one_kit);
  }

  #[test]
  fn timestamp_delta_rejects_going_backwards() {
    let earlier = Timestamp::from_unix_seconds(10);
    let later = Timestamp::from_unix_seconds(20);
    assert!(earlier.checked_sub(later).is_err());
    assert!(later.checked_sub(earlier).is_ok());
  }
}
