//! Numeric substrate for the checker-core protocol.
//!
//! Two representations of exact monetary quantities coexist here:
//! [`FixedPoint`], a `2^64`-scaled signed fixed-point integer used for every
//! value the rest of the workspace stores on chain, and [`Ratio`], an exact
//! arbitrary-precision rational used internally by the parameter controller
//! wherever rounding an intermediate result would compound across the seven
//! chained multiplications in `touch`. [`Tez`] and [`Kit`] tag the two
//! monetary units so they cannot be mixed by accident.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod constants;
pub mod error;
pub mod fixed_point;
pub mod money;
pub mod ratio;

pub use constants as params;
pub use error::ArithError;
pub use fixed_point::FixedPoint;
pub use money::{Kit, Tez, Timestamp};
pub use ratio::{Ratio, RatioInput};
