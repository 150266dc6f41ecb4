//! The pure `touch` state transition (spec §4.4), independent of
//! storage. Every intermediate value is an exact [`Ratio`]; only the
//! final assignment into the returned [`Parameters`] floors back down
//! to `FixedPoint` (per §4.4: "all ratio-to-fixed-point conversions in
//! this sequence use floor"), so none of the seven chained
//! multiplications and divisions compound rounding error along the way
//! (spec §9 "Exact rationals with deferred rounding").

extern crate alloc;

use crate::types::Parameters;
use num_bigint::BigInt;
use primitives::{constants, ArithError, Kit, Ratio, Tez, Timestamp};

/// Everything `touch` can fail with: a numeric-substrate error bubbled up
/// from one of the chained `Ratio` operations, or step 5's own
/// `target <= 0` precondition violation (spec §4.4/§7), which is distinct
/// from the `Δt < 0` case `ArithError::NegativeResult` already covers via
/// `Timestamp::checked_sub` and must stay distinguishable from it at the
/// pallet boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControllerError {
  Arith(ArithError),
  NonPositiveTarget,
}

impl From<ArithError> for ControllerError {
  fn from(e: ArithError) -> Self {
    ControllerError::Arith(e)
  }
}

/// `exp(a) = 1 + a`, the controller's first-order Taylor approximation,
/// carried out exactly over a [`Ratio`] rather than truncated through
/// `FixedPoint::exp`.
fn exp_ratio(a: &Ratio) -> Ratio {
  Ratio::one().add(a)
}

/// Step 2: the drift derivative's five-way bracket classification.
/// Implemented as an explicit sequence of half-open-interval tests, in
/// the exact order and with the exact inequality directions spec §4.4
/// step 2 writes them, rather than by elimination — the boundary
/// `target = exp(±low)` is deliberately `<` on one side and `<=` on the
/// other (spec §9 open question), and that asymmetry is the thing a
/// reviewer needs to be able to see at a glance.
fn drift_derivative(target: &Ratio, dt: &Ratio) -> Ratio {
  let low = constants::target_low_bracket();
  let high = constants::target_high_bracket();
  let exp_low_pos = exp_ratio(&low);
  let exp_low_neg = exp_ratio(&low.neg());
  let exp_high_pos = exp_ratio(&high);
  let exp_high_neg = exp_ratio(&high.neg());

  let mild = constants::drift_derivative_mild();
  let severe = constants::drift_derivative_severe();

  let magnitude = if target.gt(&exp_low_neg) && target.lt(&exp_low_pos) {
    Ratio::zero()
  } else if target.gt(&exp_high_neg) && target.le(&exp_low_neg) {
    mild.neg()
  } else if target.ge(&exp_low_pos) && target.lt(&exp_high_pos) {
    mild
  } else if target.le(&exp_high_neg) {
    severe.neg()
  } else {
    // target >= exp_high_pos
    severe
  };

  let _ = dt; // drift' depends only on the current target, not on Δt.
  magnitude
}

/// The controller's single entry point: given the previous `Parameters`
/// and this tick's external inputs, returns `(kit_accrual_to_amm,
/// new_parameters)`. Total under the documented preconditions
/// (`outstanding >= 0`, `circulating >= 0`, `target > 0`, `now >=
/// last_touched`); a violated precondition is a programming error
/// (spec §4.4 "Failure semantics"), surfaced here as `Err` so the
/// pallet boundary can reject the call instead of panicking.
pub fn touch(
  now: Timestamp,
  oracle_index: Tez,
  kit_price_in_coin: &Ratio,
  params: &Parameters,
) -> Result<(Kit, Parameters), ControllerError> {
  let dt = now.checked_sub(params.last_touched)?;

  // Step 1: protected index.
  let oracle_index_r = Ratio::from_fixed_point(oracle_index.to_fixed());
  let protected_index_r = Ratio::from_fixed_point(params.protected_index.to_fixed());
  if protected_index_r.is_zero() {
    return Err(ArithError::DivideByZero.into());
  }
  let relative = oracle_index_r.div(&protected_index_r)?;
  let epsilon = constants::protected_index_epsilon();
  let lower_bound = exp_ratio(&epsilon.neg().mul(&dt));
  let upper_bound = exp_ratio(&epsilon.mul(&dt));
  let clamped_relative = relative.clamp(&lower_bound, &upper_bound);
  let new_protected_index_r = protected_index_r.mul(&clamped_relative);
  let new_protected_index = Tez::from_fixed(new_protected_index_r.floor()?);

  // Step 2: drift derivative, evaluated against the *previous* target.
  let target_r = Ratio::from_fixed_point(params.target.to_fixed());
  let drift_derivative_new_r = drift_derivative(&target_r, &dt);

  // Step 3: drift.
  let drift_old_r = Ratio::from_fixed_point(params.drift.to_fixed());
  let drift_derivative_old_r = Ratio::from_fixed_point(params.drift_derivative.to_fixed());
  let half = Ratio::new(BigInt::from(1), BigInt::from(2)).expect("2 != 0");
  let drift_new_r = drift_old_r.add(
    &half
      .mul(&drift_derivative_old_r.add(&drift_derivative_new_r))
      .mul(&dt),
  );

  // Step 4: q.
  let q_old_r = Ratio::from_fixed_point(params.q.to_fixed());
  let one_sixth = Ratio::new(BigInt::from(1), BigInt::from(6)).expect("6 != 0");
  let two = Ratio::from_int(2);
  let q_exponent = drift_old_r
    .add(
      &one_sixth
        .mul(&two.mul(&drift_derivative_old_r).add(&drift_derivative_new_r))
        .mul(&dt),
    )
    .mul(&dt);
  let q_new_r = q_old_r.mul(&exp_ratio(&q_exponent));

  // Step 5: target.
  let target_new_r = q_new_r.mul(&oracle_index_r).div(kit_price_in_coin)?;
  if !target_new_r.is_positive() {
    return Err(ControllerError::NonPositiveTarget);
  }

  // Step 6: burrow-fee index.
  let burrow_fee_index_old_r = Ratio::from_fixed_point(params.burrow_fee_index.to_fixed());
  let burrow_fee_factor = Ratio::one().add(
    &constants::burrow_fee_percentage()
      .mul(&dt)
      .div(&Ratio::from_int(constants::SECONDS_IN_A_YEAR))?,
  );
  let burrow_fee_index_new_r = burrow_fee_index_old_r.mul(&burrow_fee_factor);

  // Step 7: imbalance percentage.
  let outstanding_r = Ratio::from_fixed_point(params.outstanding_kit.to_fixed());
  let circulating_r = Ratio::from_fixed_point(params.circulating_kit.to_fixed());
  let imbalance_percentage = if outstanding_r.is_zero() {
    debug_assert!(
      circulating_r.is_zero(),
      "compute_imbalance: outstanding_kit = 0 implies circulating_kit = 0 (spec §9 open question)"
    );
    Ratio::zero()
  } else {
    let delta = outstanding_r.sub(&circulating_r);
    let bound = outstanding_r.mul(&Ratio::from_int(5));
    let clamped = delta.clamp(&bound.neg(), &bound);
    clamped
      .mul(&Ratio::new(BigInt::from(1), BigInt::from(100)).expect("100 != 0"))
      .div(&outstanding_r)?
  };

  // Step 8: imbalance index.
  let imbalance_index_old_r = Ratio::from_fixed_point(params.imbalance_index.to_fixed());
  let imbalance_factor = Ratio::one().add(
    &imbalance_percentage
      .mul(&dt)
      .div(&Ratio::from_int(constants::SECONDS_IN_A_YEAR))?,
  );
  let imbalance_index_new_r = imbalance_index_old_r.mul(&imbalance_factor);

  // Step 9-12: accrual and the new outstanding/circulating totals.
  let with_burrow_fee_r = outstanding_r
    .mul(&burrow_fee_index_new_r)
    .div(&burrow_fee_index_old_r)?;
  let accrual_r = with_burrow_fee_r.sub(&outstanding_r);
  let new_outstanding_r = with_burrow_fee_r
    .mul(&imbalance_index_new_r)
    .div(&imbalance_index_old_r)?;
  let new_circulating_r = circulating_r.add(&accrual_r);

  let new_params = Parameters {
    q: q_new_r.floor()?,
    index: oracle_index,
    protected_index: new_protected_index,
    target: target_new_r.floor()?,
    drift: drift_new_r.floor()?,
    drift_derivative: drift_derivative_new_r.floor()?,
    burrow_fee_index: burrow_fee_index_new_r.floor()?,
    imbalance_index: imbalance_index_new_r.floor()?,
    outstanding_kit: Kit::from_fixed(new_outstanding_r.floor()?),
    circulating_kit: Kit::from_fixed(new_circulating_r.floor()?),
    last_touched: now,
  };
  let accrual = Kit::from_fixed(accrual_r.floor()?);

  Ok((accrual, new_params))
}
