//! Unit tests for the constant-product pool.

use crate::mock::{new_test_ext, Amm, RuntimeOrigin, Test};
use crate::{Error, Pool, PoolState};
use primitives::{Kit, Tez, Timestamp};

fn seed(coin: i64, kit: i64, lp_supply: u128) {
  Pool::<Test>::put(PoolState {
    coin_balance: Tez::of_int(coin),
    kit_balance: Kit::of_int(kit),
    lp_token_supply: lp_supply,
  });
}

#[test]
fn buy_kit_follows_constant_product_formula() {
  new_test_ext().execute_with(|| {
    seed(1_000, 1_000, 1_000);
    let now = Timestamp::from_unix_seconds(0);
    let deadline = Timestamp::from_unix_seconds(10);
    Amm::buy_kit(RuntimeOrigin::signed(1), Tez::of_int(10), Kit::ZERO, now, deadline).unwrap();

    // kit_out = floor(10 * 1000 * 998 / (1000 * 1000 + 10 * 998)) = floor(9_980_000 / 1_009_980) = 9
    let pool = Pool::<Test>::get();
    assert_eq!(pool.coin_balance, Tez::of_int(1_010));
    assert_eq!(pool.kit_balance, Kit::of_int(991));
  });
}

#[test]
fn buy_kit_rejects_expired_deadline_and_leaves_pool_untouched() {
  new_test_ext().execute_with(|| {
    seed(1_000, 1_000, 1_000);
    let before = Pool::<Test>::get();
    let now = Timestamp::from_unix_seconds(100);
    let deadline = Timestamp::from_unix_seconds(10);
    let result = Amm::buy_kit(RuntimeOrigin::signed(1), Tez::of_int(10), Kit::ZERO, now, deadline);
    assert_eq!(result, Err(Error::<Test>::Expired.into()));
    assert_eq!(Pool::<Test>::get(), before);
  });
}

#[test]
fn buy_kit_rejects_empty_pool() {
  new_test_ext().execute_with(|| {
    let now = Timestamp::from_unix_seconds(0);
    let deadline = Timestamp::from_unix_seconds(10);
    let result = Amm::buy_kit(RuntimeOrigin::signed(1), Tez::of_int(10), Kit::ZERO, now, deadline);
    assert_eq!(result, Err(Error::<Test>::EmptyPool.into()));
  });
}

#[test]
fn buy_kit_rejects_output_below_minimum() {
  new_test_ext().execute_with(|| {
    seed(1_000, 1_000, 1_000);
    let now = Timestamp::from_unix_seconds(0);
    let deadline = Timestamp::from_unix_seconds(10);
    let result = Amm::buy_kit(RuntimeOrigin::signed(1), Tez::of_int(10), Kit::of_int(1_000), now, deadline);
    assert_eq!(result, Err(Error::<Test>::TooLittleKit.into()));
  });
}

#[test]
fn sell_kit_is_symmetric_to_buy_kit() {
  new_test_ext().execute_with(|| {
    seed(1_000, 1_000, 1_000);
    let now = Timestamp::from_unix_seconds(0);
    let deadline = Timestamp::from_unix_seconds(10);
    Amm::sell_kit(RuntimeOrigin::signed(1), Kit::of_int(10), Tez::ZERO, now, deadline).unwrap();

    let pool = Pool::<Test>::get();
    assert_eq!(pool.kit_balance, Kit::of_int(1_010));
    assert_eq!(pool.coin_balance, Tez::of_int(991));
  });
}

#[test]
fn buy_liquidity_on_empty_pool_seeds_the_price() {
  new_test_ext().execute_with(|| {
    Amm::buy_liquidity(RuntimeOrigin::signed(1), Tez::of_int(100), Kit::of_int(200)).unwrap();
    let pool = Pool::<Test>::get();
    assert_eq!(pool.coin_balance, Tez::of_int(100));
    assert_eq!(pool.kit_balance, Kit::of_int(200));
    assert_eq!(pool.lp_token_supply, 100);
    assert_eq!(crate::LpBalances::<Test>::get(1), 100);
  });
}

#[test]
fn buy_liquidity_preserves_ratio_and_refunds_the_longer_side() {
  new_test_ext().execute_with(|| {
    seed(1_000, 2_000, 1_000);
    // Offering 100 coin and 1000 kit: only 200 kit is needed to match the
    // pool's 1:2 ratio, so the rest of the kit offer is simply not taken.
    Amm::buy_liquidity(RuntimeOrigin::signed(1), Tez::of_int(100), Kit::of_int(1_000)).unwrap();
    let pool = Pool::<Test>::get();
    assert_eq!(pool.coin_balance, Tez::of_int(1_100));
    assert_eq!(pool.kit_balance, Kit::of_int(2_200));
    // 1000 * 100 / 1000 = 100 new tokens minted against the existing supply.
    assert_eq!(pool.lp_token_supply, 1_100);
  });
}

#[test]
fn sell_liquidity_redeems_pro_rata() {
  new_test_ext().execute_with(|| {
    seed(1_000, 2_000, 1_000);
    crate::LpBalances::<Test>::insert(1, 1_000u128);
    Amm::sell_liquidity(RuntimeOrigin::signed(1), 250).unwrap();
    let pool = Pool::<Test>::get();
    assert_eq!(pool.coin_balance, Tez::of_int(750));
    assert_eq!(pool.kit_balance, Kit::of_int(1_500));
    assert_eq!(pool.lp_token_supply, 750);
    assert_eq!(crate::LpBalances::<Test>::get(1), 750);
  });
}

#[test]
fn add_accrued_kit_increases_kit_side_only() {
  new_test_ext().execute_with(|| {
    seed(1_000, 1_000, 1_000);
    Amm::add_accrued_kit(Kit::of_int(50));
    let pool = Pool::<Test>::get();
    assert_eq!(pool.kit_balance, Kit::of_int(1_050));
    assert_eq!(pool.coin_balance, Tez::of_int(1_000));
    assert_eq!(pool.lp_token_supply, 1_000);
  });
}

#[test]
fn kit_in_coin_is_the_spot_ratio() {
  new_test_ext().execute_with(|| {
    seed(1_000, 500, 1_000);
    let ratio = Amm::kit_in_coin().unwrap();
    assert_eq!(ratio.floor().unwrap(), primitives::FixedPoint::of_int(2));
  });
}
