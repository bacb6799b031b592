use core::cmp::Ordering;

use super::node::{Gap, Tree, gapee, link};
use super::rotate::{Imbalance, rotate_left, rotate_right};

/// How a rebuilt subtree's height relates to the subtree it replaced.
///
/// Once a recursive call reports `SameHeight`, every ancestor rebuilds with
/// unchanged gap bits and reports `SameHeight` itself; this is what bounds
/// insertion and join to a single rebalancing step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HeightDelta {
    SameHeight,
    Higher,
}

/// Outcome of an insertion attempt.
pub(crate) enum InsertResult<K> {
    /// The key is already present; the input tree is unchanged.
    AlreadyPresent,
    /// A new tree containing the key, plus its height relative to the input.
    Inserted(Tree<K>, HeightDelta),
}

/// Inserts `key`, rebuilding the access path and rebalancing at most once.
pub(crate) fn insert<K: Ord + Clone>(tree: &Tree<K>, key: K) -> InsertResult<K> {
    let Some(node) = tree else {
        let single = link(None, key, None, Gap::NoGap, Gap::NoGap);
        return InsertResult::Inserted(single, HeightDelta::Higher);
    };

    match key.cmp(&node.key) {
        Ordering::Equal => InsertResult::AlreadyPresent,
        Ordering::Less => match insert(&node.left, key) {
            InsertResult::AlreadyPresent => InsertResult::AlreadyPresent,
            InsertResult::Inserted(left, HeightDelta::SameHeight) => InsertResult::Inserted(
                link(
                    left,
                    node.key.clone(),
                    node.right.clone(),
                    node.lgap,
                    node.rgap,
                ),
                HeightDelta::SameHeight,
            ),
            InsertResult::Inserted(left, HeightDelta::Higher) => {
                let (tree, delta) = grow_left(
                    left,
                    node.key.clone(),
                    node.right.clone(),
                    node.lgap,
                    node.rgap,
                );
                InsertResult::Inserted(tree, delta)
            }
        },
        Ordering::Greater => match insert(&node.right, key) {
            InsertResult::AlreadyPresent => InsertResult::AlreadyPresent,
            InsertResult::Inserted(right, HeightDelta::SameHeight) => InsertResult::Inserted(
                link(
                    node.left.clone(),
                    node.key.clone(),
                    right,
                    node.lgap,
                    node.rgap,
                ),
                HeightDelta::SameHeight,
            ),
            InsertResult::Inserted(right, HeightDelta::Higher) => {
                let (tree, delta) = grow_right(
                    node.left.clone(),
                    node.key.clone(),
                    right,
                    node.lgap,
                    node.rgap,
                );
                InsertResult::Inserted(tree, delta)
            }
        },
    }
}

/// Rebuilds a node whose left subtree grew by one level.
///
/// Absorbs the growth into an existing left gap when there is one, raises
/// the node when both sides were level, and rotates when the right sibling
/// already sits two levels down. Only the raise changes the node's height,
/// and it never produces a gap on both sides, so trees built by insertion
/// alone satisfy the strict AVL balance rule.
pub(crate) fn grow_left<K: Clone>(
    grown: Tree<K>,
    key: K,
    right: Tree<K>,
    lgap: Gap,
    rgap: Gap,
) -> (Tree<K>, HeightDelta) {
    match (lgap, rgap) {
        (Gap::Gap, _) => (
            link(grown, key, right, Gap::NoGap, rgap),
            HeightDelta::SameHeight,
        ),
        (Gap::NoGap, Gap::NoGap) => (
            link(grown, key, right, Gap::NoGap, Gap::Gap),
            HeightDelta::Higher,
        ),
        (Gap::NoGap, Gap::Gap) => {
            debug_assert!(gapee(&grown), "a freshly grown subtree must be gapee");
            let tall = grown.expect("a subtree that grew is never a leaf");
            (
                rotate_right(tall, key, right, Imbalance::Grown),
                HeightDelta::SameHeight,
            )
        }
    }
}

/// Mirror image of [`grow_left`] for a grown right subtree.
pub(crate) fn grow_right<K: Clone>(
    left: Tree<K>,
    key: K,
    grown: Tree<K>,
    lgap: Gap,
    rgap: Gap,
) -> (Tree<K>, HeightDelta) {
    match (lgap, rgap) {
        (_, Gap::Gap) => (
            link(left, key, grown, lgap, Gap::NoGap),
            HeightDelta::SameHeight,
        ),
        (Gap::NoGap, Gap::NoGap) => (
            link(left, key, grown, Gap::Gap, Gap::NoGap),
            HeightDelta::Higher,
        ),
        (Gap::Gap, Gap::NoGap) => {
            debug_assert!(gapee(&grown), "a freshly grown subtree must be gapee");
            let tall = grown.expect("a subtree that grew is never a leaf");
            (
                rotate_left(left, key, tall, Imbalance::Grown),
                HeightDelta::SameHeight,
            )
        }
    }
}
