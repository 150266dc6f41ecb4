//! Arena node shapes.
//!
//! A node is either a [`Leaf`](Node::Leaf) carrying one liquidation item,
//! or a [`Branch`](Node::Branch) carrying the per-subtree aggregates
//! (`height`, `collateral`) the order-statistic `split` needs, plus a
//! `key` equal to the minimum id in the branch's right subtree: `id <
//! key` steers left, `id >= key` steers right.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use primitives::Tez;
use scale_info::TypeInfo;

/// A liquidation-item tuple, totally ordered by `id`.
#[derive(
  Clone,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub struct Item<Payload> {
  pub id: i64,
  pub payload: Payload,
  pub collateral: Tez,
}

/// A node in the arena. Generic over the handle type only so test code
/// can exercise the algorithm against `u64` handles without pulling in a
/// full `Config`.
#[derive(Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub enum Node<Payload> {
  Leaf {
    item: Item<Payload>,
    parent: Option<u64>,
  },
  Branch {
    left: u64,
    left_height: u32,
    left_collateral: Tez,
    key: i64,
    right: u64,
    right_height: u32,
    right_collateral: Tez,
    parent: Option<u64>,
  },
}

impl<Payload> Node<Payload> {
  pub fn parent(&self) -> Option<u64> {
    match self {
      Node::Leaf { parent, .. } => *parent,
      Node::Branch { parent, .. } => *parent,
    }
  }

  pub fn set_parent(&mut self, new_parent: Option<u64>) {
    match self {
      Node::Leaf { parent, .. } => *parent = new_parent,
      Node::Branch { parent, .. } => *parent = new_parent,
    }
  }

  pub fn height(&self) -> u32 {
    match self {
      Node::Leaf { .. } => 1,
      Node::Branch {
        left_height,
        right_height,
        ..
      } => 1 + core::cmp::max(*left_height, *right_height),
    }
  }

  pub fn collateral(&self) -> Tez {
    match self {
      Node::Leaf { item, .. } => item.collateral,
      Node::Branch {
        left_collateral,
        right_collateral,
        ..
      } => left_collateral.add(*right_collateral),
    }
  }

  pub fn balance_factor(&self) -> i64 {
    match self {
      Node::Leaf { .. } => 0,
      Node::Branch {
        left_height,
        right_height,
        ..
      } => *left_height as i64 - *right_height as i64,
    }
  }

  /// Destructures a `Branch`'s fields, or `None` for a `Leaf`. Saves every
  /// caller in `engine.rs` from repeating the same nine-field match arm.
  pub fn into_branch(self) -> Option<BranchFields> {
    match self {
      Node::Leaf { .. } => None,
      Node::Branch {
        left,
        left_height,
        left_collateral,
        key,
        right,
        right_height,
        right_collateral,
        parent,
      } => Some(BranchFields {
        left,
        left_height,
        left_collateral,
        key,
        right,
        right_height,
        right_collateral,
        parent,
      }),
    }
  }
}

/// The fields of a [`Node::Branch`], pulled out by value.
pub struct BranchFields {
  pub left: u64,
  pub left_height: u32,
  pub left_collateral: Tez,
  pub key: i64,
  pub right: u64,
  pub right_height: u32,
  pub right_collateral: Tez,
  pub parent: Option<u64>,
}

/// Which child of a branch an operation patched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
  Left,
  Right,
}
