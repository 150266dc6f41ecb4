//! A signed, `2^64`-scaled fixed-point number.
//!
//! `FixedPoint(n)` represents the real number `n / 2^64`. Addition and
//! subtraction are exact. Multiplication and division go through a
//! `BigInt` intermediate so the `2^64` shift never overflows the `i128`
//! storage representation before it is truncated back down; both round
//! toward zero, never toward negative infinity, matching the "truncating"
//! contract the protocol documents rather than silent banker's rounding.

use crate::error::ArithError;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use scale_info::TypeInfo;

/// `log2` of the fixed-point scale: values are multiples of `2^-64`.
pub const SCALE_EXPONENT: u32 = 64;

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
pub struct FixedPoint(i128);

impl FixedPoint {
  pub const ZERO: FixedPoint = FixedPoint(0);
  pub const ONE: FixedPoint = FixedPoint(1i128 << SCALE_EXPONENT);

  /// Construct from a raw `2^64`-scaled integer, with no further scaling.
  pub const fn from_raw(raw: i128) -> Self {
    FixedPoint(raw)
  }

  /// The raw `2^64`-scaled integer.
  pub const fn to_raw(self) -> i128 {
    self.0
  }

  /// Construct from an integer number of whole units.
  pub fn of_int(n: i64) -> Self {
    FixedPoint((n as i128) << SCALE_EXPONENT)
  }

  pub fn is_zero(self) -> bool {
    self.0 == 0
  }

  pub fn is_negative(self) -> bool {
    self.0 < 0
  }

  pub fn neg(self) -> Self {
    FixedPoint(-self.0)
  }

  pub fn add(self, other: Self) -> Self {
    FixedPoint(self.0 + other.0)
  }

  pub fn sub(self, other: Self) -> Self {
    FixedPoint(self.0 - other.0)
  }

  /// Truncates toward zero.
  pub fn mul(self, other: Self) -> Result<Self, ArithError> {
    let wide = BigInt::from(self.0) * BigInt::from(other.0);
    let scale = BigInt::from(1u8) << SCALE_EXPONENT;
    // `BigInt`'s `Div` truncates toward zero like primitive integer
    // division; a bitwise shift would instead floor negative results,
    // which would silently violate the truncating-toward-zero contract.
    let result = truncating_div(wide, scale);
    to_i128(result).map(FixedPoint)
  }

  /// Truncates toward zero. Fails with [`ArithError::DivideByZero`] when
  /// `other` is zero.
  pub fn div(self, other: Self) -> Result<Self, ArithError> {
    if other.0 == 0 {
      return Err(ArithError::DivideByZero);
    }
    let dividend = BigInt::from(self.0) << SCALE_EXPONENT;
    let divisor = BigInt::from(other.0);
    let quotient = truncating_div(dividend, divisor);
    to_i128(quotient).map(FixedPoint)
  }

  /// `pow(x, 0) = 1`, `pow(x, n) = x^n / scaling^(n-1)` for `n >= 1`.
  pub fn pow(self, n: u32) -> Result<Self, ArithError> {
    if n == 0 {
      return Ok(Self::ONE);
    }
    let mut acc = self;
    for _ in 1..n {
      acc = acc.mul(self)?;
    }
    Ok(acc)
  }

  /// First-order Taylor approximation of `e^a`: `exp(a) = 1 + a`.
  pub fn exp(self) -> Self {
    Self::ONE.add(self)
  }

  /// Parses `[-]HEX[.HEX]`; the fractional part (if present) is read as a
  /// hex fraction, i.e. a `k`-digit fractional part contributes
  /// `frac / 16^k`, then is rescaled into the `2^64` representation.
  pub fn of_hex_string(s: &str) -> Result<Self, ArithError> {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
      Some((i, f)) => (i, Some(f)),
      None => (rest, None),
    };

    let int_value = if int_part.is_empty() {
      BigInt::zero()
    } else {
      BigInt::parse_bytes(int_part.as_bytes(), 16).ok_or(ArithError::Overflow)?
    };
    let mut raw = int_value << SCALE_EXPONENT;

    if let Some(frac) = frac_part {
      if !frac.is_empty() {
        let frac_value =
          BigInt::parse_bytes(frac.as_bytes(), 16).ok_or(ArithError::Overflow)?;
        let frac_bits = (frac.len() as u32) * 4;
        let scaled = if frac_bits <= SCALE_EXPONENT {
          frac_value << (SCALE_EXPONENT - frac_bits)
        } else {
          truncating_div(frac_value << SCALE_EXPONENT, BigInt::from(1u8) << frac_bits)
        };
        raw += scaled;
      }
    }

    if negative {
      raw = -raw;
    }
    to_i128(raw).map(FixedPoint)
  }

  /// Renders as `[-]HEX.HEX` with an exactly-16-hex-digit fractional part
  /// (`SCALE_EXPONENT / 4` digits), the inverse layout `of_hex_string`
  /// parses.
  #[cfg(feature = "std")]
  pub fn to_hex_string(self) -> alloc::string::String {
    use alloc::format;
    let negative = self.0 < 0;
    let magnitude = BigInt::from(self.0).abs();
    let mask = (BigInt::from(1u8) << SCALE_EXPONENT) - BigInt::from(1u8);
    let int_part = &magnitude >> SCALE_EXPONENT;
    let frac_part = &magnitude & &mask;
    let sign = if negative { "-" } else { "" };
    format!(
      "{sign}{int_part:x}.{frac_part:016x}",
      int_part = int_part,
      frac_part = frac_part
    )
  }
}

fn to_i128(value: BigInt) -> Result<i128, ArithError> {
  value.to_i128().ok_or(ArithError::Overflow)
}

/// Integer division truncating toward zero (the default for `BigInt`'s
/// `Div` when both limbs are the bigint's own sign convention already
/// rounds toward zero, but we spell it out since that contract is
/// protocol-critical rather than incidental).
fn truncating_div(dividend: BigInt, divisor: BigInt) -> BigInt {
  dividend / divisor
}
