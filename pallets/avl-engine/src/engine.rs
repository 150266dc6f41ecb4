//! The order-statistic AVL algorithm: `add`, `del`, `join`, `split`, and
//! the traversal/invariant helpers built on top of them.
//!
//! Every entry point takes a root as `Option<u64>` (`None` is the empty
//! tree) and every internal handle it touches is read with [`Pallet::get`]
//! and written back with [`Pallet::set`] — there is no in-memory tree
//! structure, only arena reads and writes, so a rotation is exactly the
//! handful of `get`/`set` calls it classically costs and nothing more.

use crate::pallet::{Arena, Config, Error, NextHandle, Pallet};
use crate::types::{Item, Node, Side};
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use frame::prelude::*;
use primitives::Tez;

impl<T: Config> Pallet<T> {
  fn get(handle: u64) -> Result<Node<T::Payload>, Error<T>> {
    Arena::<T>::get(handle).ok_or(Error::<T>::DanglingHandle)
  }

  fn set(handle: u64, node: Node<T::Payload>) {
    Arena::<T>::insert(handle, node);
  }

  fn free(handle: u64) {
    Arena::<T>::remove(handle);
  }

  fn alloc(node: Node<T::Payload>) -> u64 {
    let handle = NextHandle::<T>::get();
    NextHandle::<T>::put(handle.saturating_add(1));
    Arena::<T>::insert(handle, node);
    handle
  }

  fn set_parent(handle: u64, parent: Option<u64>) -> Result<(), Error<T>> {
    let mut node = Self::get(handle)?;
    node.set_parent(parent);
    Self::set(handle, node);
    Ok(())
  }

  fn height_opt(handle: Option<u64>) -> Result<u32, Error<T>> {
    match handle {
      None => Ok(0),
      Some(h) => Ok(Self::get(h)?.height()),
    }
  }

  fn collateral_opt(handle: Option<u64>) -> Result<Tez, Error<T>> {
    match handle {
      None => Ok(Tez::ZERO),
      Some(h) => Ok(Self::get(h)?.collateral()),
    }
  }

  /// Rewrites the `side` child of branch `parent_handle` to `new_child`,
  /// refreshing that side's height/collateral aggregates and the child's
  /// parent pointer. Used after a recursive `add`/`del`/`join` call comes
  /// back with a (possibly different, if a rotation happened below)
  /// handle for a child that needs to be re-linked into its parent.
  fn patch_child(parent_handle: u64, side: Side, new_child: u64) -> Result<(), Error<T>> {
    let fields = Self::get(parent_handle)?
      .into_branch()
      .expect("patch_child is only called on a branch handle");
    let new_height = Self::height_opt(Some(new_child))?;
    let new_collateral = Self::collateral_opt(Some(new_child))?;
    let updated = match side {
      Side::Left => Node::Branch {
        left: new_child,
        left_height: new_height,
        left_collateral: new_collateral,
        key: fields.key,
        right: fields.right,
        right_height: fields.right_height,
        right_collateral: fields.right_collateral,
        parent: fields.parent,
      },
      Side::Right => Node::Branch {
        left: fields.left,
        left_height: fields.left_height,
        left_collateral: fields.left_collateral,
        key: fields.key,
        right: new_child,
        right_height: new_height,
        right_collateral: new_collateral,
        parent: fields.parent,
      },
    };
    Self::set(parent_handle, updated);
    Self::set_parent(new_child, Some(parent_handle))
  }

  /// Single right rotation: `h`'s left child becomes the new subtree top,
  /// `h` becomes that child's right child. `h`'s own `parent` field is
  /// preserved on the new top; the caller is responsible for re-linking
  /// whichever grandparent held `h` to the returned handle instead.
  fn rotate_right(h: u64) -> Result<u64, Error<T>> {
    let top = Self::get(h)?
      .into_branch()
      .expect("rotate_right is only called on an imbalanced branch");
    let pivot = Self::get(top.left)?
      .into_branch()
      .expect("left_height >= 2 implies the left child is itself a branch");

    Self::set(
      h,
      Node::Branch {
        left: pivot.right,
        left_height: pivot.right_height,
        left_collateral: pivot.right_collateral,
        key: top.key,
        right: top.right,
        right_height: top.right_height,
        right_collateral: top.right_collateral,
        parent: Some(top.left),
      },
    );
    Self::set_parent(pivot.right, Some(h))?;

    let h_height = Self::get(h)?.height();
    let h_collateral = Self::get(h)?.collateral();
    Self::set(
      top.left,
      Node::Branch {
        left: pivot.left,
        left_height: pivot.left_height,
        left_collateral: pivot.left_collateral,
        key: pivot.key,
        right: h,
        right_height: h_height,
        right_collateral: h_collateral,
        parent: top.parent,
      },
    );
    Ok(top.left)
  }

  /// Single left rotation, symmetric to [`Self::rotate_right`].
  fn rotate_left(h: u64) -> Result<u64, Error<T>> {
    let top = Self::get(h)?
      .into_branch()
      .expect("rotate_left is only called on an imbalanced branch");
    let pivot = Self::get(top.right)?
      .into_branch()
      .expect("right_height >= 2 implies the right child is itself a branch");

    Self::set(
      h,
      Node::Branch {
        left: top.left,
        left_height: top.left_height,
        left_collateral: top.left_collateral,
        key: top.key,
        right: pivot.left,
        right_height: pivot.left_height,
        right_collateral: pivot.left_collateral,
        parent: Some(top.right),
      },
    );
    Self::set_parent(pivot.left, Some(h))?;

    let h_height = Self::get(h)?.height();
    let h_collateral = Self::get(h)?.collateral();
    Self::set(
      top.right,
      Node::Branch {
        left: h,
        left_height: h_height,
        left_collateral: h_collateral,
        key: pivot.key,
        right: pivot.right,
        right_height: pivot.right_height,
        right_collateral: pivot.right_collateral,
        parent: top.parent,
      },
    );
    Ok(top.right)
  }

  /// Restores the AVL balance property at `h`, rotating if `|balance
  /// factor| > 1`, and returns the handle now at the top of this subtree
  /// (unchanged unless a rotation ran). A double-rotation case first
  /// re-links the heavy child's rotated form via `patch_child` rather
  /// than hand-adjusting its height by one, trading one extra arena read
  /// for not having to re-derive that shortcut's arithmetic here.
  fn balance(h: u64) -> Result<u64, Error<T>> {
    let node = Self::get(h)?;
    match node.balance_factor() {
      -1..=1 => Ok(h),
      2 => {
        let fields = node.into_branch().expect("non-leaf balance factor");
        let left_node = Self::get(fields.left)?;
        if left_node.balance_factor() >= 0 {
          Self::rotate_right(h)
        } else {
          let rotated_left = Self::rotate_left(fields.left)?;
          Self::patch_child(h, Side::Left, rotated_left)?;
          Self::rotate_right(h)
        }
      }
      -2 => {
        let fields = node.into_branch().expect("non-leaf balance factor");
        let right_node = Self::get(fields.right)?;
        if right_node.balance_factor() <= 0 {
          Self::rotate_left(h)
        } else {
          let rotated_right = Self::rotate_right(fields.right)?;
          Self::patch_child(h, Side::Right, rotated_right)?;
          Self::rotate_left(h)
        }
      }
      other => unreachable!("AVL height drift beyond +-2 at a single node: {other}"),
    }
  }

  /// Inserts `item`, keyed on `item.id`. If a leaf with the same id
  /// already exists, its payload and collateral are overwritten in place
  /// rather than rejected — the arena has no way to distinguish "insert"
  /// from "update" and the spec's worked examples rely on the latter.
  pub fn add(root: Option<u64>, item: Item<T::Payload>) -> Result<u64, Error<T>> {
    match root {
      None => Ok(Self::alloc(Node::Leaf { item, parent: None })),
      Some(h) => match Self::get(h)? {
        Node::Leaf {
          item: existing,
          parent,
        } => {
          if existing.id == item.id {
            Self::set(h, Node::Leaf { item, parent });
            Ok(h)
          } else {
            let new_leaf = Self::alloc(Node::Leaf {
              item: item.clone(),
              parent: None,
            });
            let (left, left_collateral, right, right_collateral, key) = if item.id < existing.id {
              (new_leaf, item.collateral, h, existing.collateral, existing.id)
            } else {
              (h, existing.collateral, new_leaf, item.collateral, item.id)
            };
            let branch = Self::alloc(Node::Branch {
              left,
              left_height: 1,
              left_collateral,
              key,
              right,
              right_height: 1,
              right_collateral,
              parent,
            });
            Self::set_parent(left, Some(branch))?;
            Self::set_parent(right, Some(branch))?;
            Ok(branch)
          }
        }
        Node::Branch { .. } => {
          let fields = Self::get(h)?.into_branch().expect("just matched Branch");
          if item.id < fields.key {
            let new_left = Self::add(Some(fields.left), item)?;
            Self::patch_child(h, Side::Left, new_left)?;
          } else {
            let new_right = Self::add(Some(fields.right), item)?;
            Self::patch_child(h, Side::Right, new_right)?;
          }
          Self::balance(h)
        }
      },
    }
  }

  /// Removes the item with id `id`, if present. A no-op (returning the
  /// unchanged root) when `id` is absent.
  pub fn del(root: Option<u64>, id: i64) -> Result<Option<u64>, Error<T>> {
    match root {
      None => Ok(None),
      Some(h) => match Self::get(h)? {
        Node::Leaf { item, .. } => {
          if item.id == id {
            Self::free(h);
            Ok(None)
          } else {
            Ok(Some(h))
          }
        }
        Node::Branch { .. } => {
          let fields = Self::get(h)?.into_branch().expect("just matched Branch");
          if id < fields.key {
            match Self::del(Some(fields.left), id)? {
              None => {
                Self::free(h);
                Self::set_parent(fields.right, fields.parent)?;
                Ok(Some(fields.right))
              }
              Some(new_left) => {
                Self::patch_child(h, Side::Left, new_left)?;
                Ok(Some(Self::balance(h)?))
              }
            }
          } else {
            match Self::del(Some(fields.right), id)? {
              None => {
                Self::free(h);
                Self::set_parent(fields.left, fields.parent)?;
                Ok(Some(fields.left))
              }
              Some(new_right) => {
                Self::patch_child(h, Side::Right, new_right)?;
                Ok(Some(Self::balance(h)?))
              }
            }
          }
        }
      },
    }
  }

  /// Joins two trees known to partition the key space: every id in `left`
  /// must be less than every id in `right`. Fails with
  /// [`Error::BadJoinOrder`] if that precondition does not hold.
  pub fn join(left: Option<u64>, right: Option<u64>) -> Result<Option<u64>, Error<T>> {
    match (left, right) {
      (None, None) => Ok(None),
      (Some(l), None) => Ok(Some(l)),
      (None, Some(r)) => Ok(Some(r)),
      (Some(l), Some(r)) => {
        let max_left = Self::max(Some(l))?.expect("l is Some, so its subtree is non-empty").id;
        let min_right = Self::min(Some(r))?.expect("r is Some, so its subtree is non-empty").id;
        if max_left >= min_right {
          return Err(Error::<T>::BadJoinOrder);
        }
        Ok(Some(Self::join_balanced(l, r)?))
      }
    }
  }

  /// Joins two non-empty, already-ordered subtrees, rebalancing along the
  /// way down the taller side so the result stays height-balanced.
  fn join_balanced(left: u64, right: u64) -> Result<u64, Error<T>> {
    let left_height = Self::height_opt(Some(left))?;
    let right_height = Self::height_opt(Some(right))?;
    if (left_height as i64 - right_height as i64).abs() < 2 {
      let key = Self::min(Some(right))?.expect("right is non-empty").id;
      let branch = Self::alloc(Node::Branch {
        left,
        left_height,
        left_collateral: Self::collateral_opt(Some(left))?,
        key,
        right,
        right_height,
        right_collateral: Self::collateral_opt(Some(right))?,
        parent: None,
      });
      Self::set_parent(left, Some(branch))?;
      Self::set_parent(right, Some(branch))?;
      Ok(branch)
    } else if left_height > right_height {
      let fields = Self::get(left)?
        .into_branch()
        .expect("height >= 2 implies a branch");
      let new_inner = Self::join_balanced(fields.right, right)?;
      Self::patch_child(left, Side::Right, new_inner)?;
      Self::balance(left)
    } else {
      let fields = Self::get(right)?
        .into_branch()
        .expect("height >= 2 implies a branch");
      let new_inner = Self::join_balanced(left, fields.left)?;
      Self::patch_child(right, Side::Left, new_inner)?;
      Self::balance(right)
    }
  }

  /// Splits the tree at `limit`: the left half's total collateral is the
  /// largest prefix sum `<= limit`, the right half holds the rest. Either
  /// half may come back empty.
  pub fn split(
    root: Option<u64>,
    limit: Tez,
  ) -> Result<(Option<u64>, Option<u64>), Error<T>> {
    match root {
      None => Ok((None, None)),
      Some(h) => match Self::get(h)? {
        Node::Leaf { item, .. } => {
          if item.collateral <= limit {
            Ok((Some(h), None))
          } else {
            Ok((None, Some(h)))
          }
        }
        Node::Branch { .. } => {
          let fields = Self::get(h)?.into_branch().expect("just matched Branch");
          let total = fields.left_collateral.add(fields.right_collateral);
          if total <= limit {
            Ok((Some(h), None))
          } else if fields.left_collateral == limit {
            Self::free(h);
            Self::set_parent(fields.left, None)?;
            Self::set_parent(fields.right, None)?;
            Ok((Some(fields.left), Some(fields.right)))
          } else if limit < fields.left_collateral {
            let (below, above) = Self::split(Some(fields.left), limit)?;
            let above =
              above.expect("limit < left_collateral, so left's own split has a right half");
            let joined = Self::join(Some(above), Some(fields.right))?
              .expect("joining two non-empty subtrees is never empty");
            Self::free(h);
            Ok((below, Some(joined)))
          } else {
            let remaining_limit = limit.sub(fields.left_collateral);
            let (below, above) = Self::split(Some(fields.right), remaining_limit)?;
            let new_left = match below {
              Some(below_handle) => {
                Some(Self::join(Some(fields.left), Some(below_handle))?
                  .expect("joining two non-empty subtrees is never empty"))
              }
              None => {
                Self::set_parent(fields.left, None)?;
                Some(fields.left)
              }
            };
            Self::free(h);
            Ok((new_left, above))
          }
        }
      },
    }
  }

  /// The item with the smallest id in the subtree, if any.
  pub fn min(root: Option<u64>) -> Result<Option<Item<T::Payload>>, Error<T>> {
    match root {
      None => Ok(None),
      Some(h) => match Self::get(h)? {
        Node::Leaf { item, .. } => Ok(Some(item)),
        Node::Branch { left, .. } => Self::min(Some(left)),
      },
    }
  }

  /// The item with the largest id in the subtree, if any.
  pub fn max(root: Option<u64>) -> Result<Option<Item<T::Payload>>, Error<T>> {
    match root {
      None => Ok(None),
      Some(h) => match Self::get(h)? {
        Node::Leaf { item, .. } => Ok(Some(item)),
        Node::Branch { right, .. } => Self::max(Some(right)),
      },
    }
  }

  /// An in-order dump of every item in the subtree, for tests and
  /// diagnostics; not used on any hot path.
  pub fn to_list(root: Option<u64>) -> Result<Vec<Item<T::Payload>>, Error<T>> {
    let mut out = Vec::new();
    Self::to_list_into(root, &mut out)?;
    Ok(out)
  }

  fn to_list_into(root: Option<u64>, out: &mut Vec<Item<T::Payload>>) -> Result<(), Error<T>> {
    match root {
      None => Ok(()),
      Some(h) => match Self::get(h)? {
        Node::Leaf { item, .. } => {
          out.push(item);
          Ok(())
        }
        Node::Branch { left, right, .. } => {
          Self::to_list_into(Some(left), out)?;
          Self::to_list_into(Some(right), out)
        }
      },
    }
  }

  /// Checks, from `root` down, that every branch's recorded
  /// `{left,right}_height`/`{left,right}_collateral` match their child's
  /// actual height/collateral, every parent pointer is correct, and no
  /// node's left/right heights differ by more than one. Intended for
  /// tests, not production dispatch.
  pub fn assert_invariants(root: Option<u64>) -> Result<(), Error<T>> {
    Self::check_node(root, None).map(|_| ())
  }

  fn check_node(root: Option<u64>, expected_parent: Option<u64>) -> Result<(u32, Tez), Error<T>> {
    match root {
      None => Ok((0, Tez::ZERO)),
      Some(h) => {
        let node = Self::get(h)?;
        if node.parent() != expected_parent {
          return Err(Error::<T>::ParentLinkBroken);
        }
        match node {
          Node::Leaf { item, .. } => Ok((1, item.collateral)),
          Node::Branch {
            left,
            left_height,
            left_collateral,
            right,
            right_height,
            right_collateral,
            ..
          } => {
            let (actual_left_height, actual_left_collateral) =
              Self::check_node(Some(left), Some(h))?;
            let (actual_right_height, actual_right_collateral) =
              Self::check_node(Some(right), Some(h))?;
            if actual_left_height != left_height
              || actual_left_collateral != left_collateral
              || actual_right_height != right_height
              || actual_right_collateral != right_collateral
            {
              return Err(Error::<T>::BalanceInvariantBroken);
            }
            if (actual_left_height as i64 - actual_right_height as i64).abs() > 1 {
              return Err(Error::<T>::BalanceInvariantBroken);
            }
            Ok((
              1 + core::cmp::max(actual_left_height, actual_right_height),
              actual_left_collateral.add(actual_right_collateral),
            ))
          }
        }
      }
    }
  }

  /// Checks that every handle reachable from `roots` has a node, and that
  /// every node in the arena is reachable from `roots` — i.e. there are
  /// no dangling handles and no orphaned nodes left behind by a bug in
  /// `add`/`del`/`join`/`split`'s freeing logic.
  pub fn assert_no_dangling_handles(roots: &[Option<u64>]) -> Result<(), Error<T>> {
    let mut reachable = BTreeSet::new();
    for root in roots {
      Self::collect_reachable(*root, &mut reachable)?;
    }
    let all: BTreeSet<u64> = Arena::<T>::iter_keys().collect();
    if reachable != all {
      return Err(Error::<T>::DanglingHandle);
    }
    Ok(())
  }

  fn collect_reachable(root: Option<u64>, acc: &mut BTreeSet<u64>) -> Result<(), Error<T>> {
    match root {
      None => Ok(()),
      Some(h) => {
        acc.insert(h);
        if let Node::Branch { left, right, .. } = Self::get(h)? {
          Self::collect_reachable(Some(left), acc)?;
          Self::collect_reachable(Some(right), acc)?;
        }
        Ok(())
      }
    }
  }
}
