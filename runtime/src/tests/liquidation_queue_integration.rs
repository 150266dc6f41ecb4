//! Exercises `pallet-avl-engine` through the aggregate `Runtime` rather
//! than its own single-pallet `mock.rs`, the way a liquidation-queue
//! client pallet would call it alongside the rest of the workspace.
//! Only the data-structure contract is driven here — which items a
//! real client chooses to liquidate is out of scope (spec §1).

use crate::{new_test_ext, AvlEngine};
use pallet_avl_engine::Item;
use primitives::Tez;

fn item(id: i64, collateral: i64) -> Item<u64> {
  Item {
    id,
    payload: id as u64,
    collateral: Tez::of_int(collateral),
  }
}

#[test]
fn engine_is_reachable_through_the_runtime_aggregate() {
  new_test_ext(0).execute_with(|| {
    let mut root = None;
    for (id, collateral) in [(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)] {
      root = Some(AvlEngine::add(root, item(id, collateral)).unwrap());
    }
    AvlEngine::assert_invariants(root).unwrap();
    AvlEngine::assert_no_dangling_handles(&[root]).unwrap();

    // Total collateral is 150; splitting at 60 should carry the
    // smallest-id prefix whose running sum stays <= 60 (10+20+30=60).
    let (below, above) = AvlEngine::split(root, Tez::of_int(60)).unwrap();
    let below_ids: alloc::vec::Vec<i64> =
      AvlEngine::to_list(below).unwrap().iter().map(|i| i.id).collect();
    let above_ids: alloc::vec::Vec<i64> =
      AvlEngine::to_list(above).unwrap().iter().map(|i| i.id).collect();
    assert_eq!(below_ids, alloc::vec![1, 2, 3]);
    assert_eq!(above_ids, alloc::vec![4, 5]);

    // The split-off "below" batch is what a liquidation-queue client
    // would drain and free; deleting every id from it should empty the
    // arena down to just the "above" remainder.
    let mut remaining = below;
    for id in below_ids {
      remaining = AvlEngine::del(remaining, id).unwrap();
    }
    assert_eq!(remaining, None);

    let rejoined = AvlEngine::join(remaining, above).unwrap();
    AvlEngine::assert_invariants(rejoined).unwrap();
    AvlEngine::assert_no_dangling_handles(&[rejoined]).unwrap();
  });
}
