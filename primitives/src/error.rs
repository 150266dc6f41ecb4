//! Error type for the numeric substrate.
//!
//! These are the "numeric edge" errors from the protocol's error-handling
//! design: reportable, but controller code is structured so that with the
//! documented preconditions they cannot occur.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
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
pub enum ArithError {
  /// `FixedPoint::div` or `Ratio::new` called with a zero divisor/denominator.
  DivideByZero,
  /// A fixed-width operation could not represent its exact result.
  Overflow,
  /// A quantity that must be non-negative by invariant came out negative.
  NegativeResult,
}

impl core::fmt::Display for ArithError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      ArithError::DivideByZero => write!(f, "division by zero"),
      ArithError::Overflow => write!(f, "arithmetic overflow"),
      ArithError::NegativeResult => write!(f, "unexpected negative result"),
    }
  }
}
