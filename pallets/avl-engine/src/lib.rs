//! Order-statistic AVL tree over an indexed arena ("big-map").
//!
//! This pallet is a pure data structure: it has no dispatchable calls of
//! its own. A liquidation-queue pallet owns a tree root (a `u64` handle,
//! or `None` for the empty tree) and calls [`Pallet::add`], [`Pallet::del`],
//! [`Pallet::join`], [`Pallet::split`] the same way the teacher's
//! `pallet-token-minting-curve` exposes `calculate_user_receives` as a
//! plain function for other pallets to call rather than as an extrinsic.
//! Per the concurrency model, no two operations may interleave on the
//! same arena; enforcing that is the caller's responsibility, not this
//! pallet's.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod types;
pub use types::{BranchFields, Item, Node, Side};

mod engine;

#[cfg(test)]
pub mod mock;

use frame::prelude::*;

#[frame::pallet]
pub mod pallet {
  use super::*;

  #[pallet::config]
  pub trait Config: frame_system::Config {
    /// The item payload carried by leaves; ordering is on `id` only, so
    /// no `Ord` bound is required on `Payload` itself.
    type Payload: Parameter + Member + MaxEncodedLen;
  }

  #[pallet::pallet]
  #[pallet::storage_version(STORAGE_VERSION)]
  pub struct Pallet<T>(_);

  const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

  /// The arena: a mapping from handle to node. Handles are never reused
  /// once freed.
  #[pallet::storage]
  pub type Arena<T: Config> = StorageMap<_, Blake2_128Concat, u64, Node<T::Payload>>;

  /// One past the highest handle ever allocated.
  #[pallet::storage]
  pub type NextHandle<T: Config> = StorageValue<_, u64, ValueQuery>;

  #[pallet::error]
  pub enum Error<T> {
    /// `Arena::get` was called on a handle with no node — the "no
    /// dangling handles" invariant would be violated by continuing.
    DanglingHandle,
    /// `join`'s precondition `max(left).id < min(right).id` did not
    /// hold.
    BadJoinOrder,
    /// A branch's recorded `{left,right}_height` disagreed with the
    /// recomputed height of its child after an operation that should
    /// have refreshed it.
    BalanceInvariantBroken,
    /// A child's recorded parent handle did not match its actual
    /// parent after an operation that should have refreshed it.
    ParentLinkBroken,
  }
}
