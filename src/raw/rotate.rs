use alloc::sync::Arc;

use super::node::{Gap, Node, Tree, link, unshare};

/// How a two-level imbalance between siblings came about.
///
/// A rotation always hands back a subtree at the height the caller's node
/// had before the imbalance, so the caller reports `SameHeight` and no
/// ancestor rebalances further. Relative to the tall child that height is
/// not the same in the two contexts: after a growth the tall child sits
/// level with its node, after a shrinkage it sits one below, so the rebuilt
/// root absorbs the difference in its own gap bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Imbalance {
    /// The tall side just grew by one (insertion, join).
    Grown,
    /// The short side just shrank by one (deletion).
    Shrunk,
}

/// Restructures around `separator` when the left subtree `tall` stands two
/// levels above `short`.
///
/// Dispatches on `tall`'s gap bits: an outward lean takes a single
/// rotation, an inward lean the double variant through `tall`'s right
/// child. A pivot with both bits equal to `Gap` never reaches here;
/// callers lower it instead of rotating.
pub(crate) fn rotate_right<K: Clone>(
    tall: Arc<Node<K>>,
    separator: K,
    short: Tree<K>,
    imbalance: Imbalance,
) -> Tree<K> {
    record_rotation();

    let t = unshare(tall);
    match (t.lgap, t.rgap) {
        // Outward lean: one new node on each side of the pivot key.
        (Gap::NoGap, Gap::Gap) => {
            let inner = link(t.right, separator, short, Gap::NoGap, Gap::NoGap);
            match imbalance {
                Imbalance::Grown => link(t.left, t.key, inner, Gap::NoGap, Gap::NoGap),
                Imbalance::Shrunk => link(t.left, t.key, inner, Gap::Gap, Gap::Gap),
            }
        }
        // Level pivot: only a shrunken sibling produces this shape.
        (Gap::NoGap, Gap::NoGap) => {
            debug_assert_eq!(imbalance, Imbalance::Shrunk);
            let inner = link(t.right, separator, short, Gap::NoGap, Gap::Gap);
            link(t.left, t.key, inner, Gap::Gap, Gap::NoGap)
        }
        // Inward lean: double rotation through the pivot's right child.
        (Gap::Gap, Gap::NoGap) => {
            let m = unshare(t.right.expect("an inward-leaning pivot has a right child"));
            let new_left = link(t.left, t.key, m.left, Gap::NoGap, m.lgap);
            let new_right = link(m.right, separator, short, m.rgap, Gap::NoGap);
            match imbalance {
                Imbalance::Grown => link(new_left, m.key, new_right, Gap::NoGap, Gap::NoGap),
                Imbalance::Shrunk => link(new_left, m.key, new_right, Gap::Gap, Gap::Gap),
            }
        }
        (Gap::Gap, Gap::Gap) => unreachable!("rotation pivot carries a gap on both sides"),
    }
}

/// Mirror image of [`rotate_right`]: the right subtree `tall` stands two
/// levels above `short`.
pub(crate) fn rotate_left<K: Clone>(
    short: Tree<K>,
    separator: K,
    tall: Arc<Node<K>>,
    imbalance: Imbalance,
) -> Tree<K> {
    record_rotation();

    let t = unshare(tall);
    match (t.lgap, t.rgap) {
        (Gap::Gap, Gap::NoGap) => {
            let inner = link(short, separator, t.left, Gap::NoGap, Gap::NoGap);
            match imbalance {
                Imbalance::Grown => link(inner, t.key, t.right, Gap::NoGap, Gap::NoGap),
                Imbalance::Shrunk => link(inner, t.key, t.right, Gap::Gap, Gap::Gap),
            }
        }
        (Gap::NoGap, Gap::NoGap) => {
            debug_assert_eq!(imbalance, Imbalance::Shrunk);
            let inner = link(short, separator, t.left, Gap::Gap, Gap::NoGap);
            link(inner, t.key, t.right, Gap::NoGap, Gap::Gap)
        }
        (Gap::NoGap, Gap::Gap) => {
            let m = unshare(t.left.expect("an inward-leaning pivot has a left child"));
            let new_left = link(short, separator, m.left, Gap::NoGap, m.lgap);
            let new_right = link(m.right, t.key, t.right, m.rgap, Gap::NoGap);
            match imbalance {
                Imbalance::Grown => link(new_left, m.key, new_right, Gap::NoGap, Gap::NoGap),
                Imbalance::Shrunk => link(new_left, m.key, new_right, Gap::Gap, Gap::Gap),
            }
        }
        (Gap::Gap, Gap::Gap) => unreachable!("rotation pivot carries a gap on both sides"),
    }
}

#[cfg(test)]
std::thread_local! {
    static ROTATIONS: core::cell::Cell<usize> = const { core::cell::Cell::new(0) };
}

/// Number of rotations performed on this thread since the test started.
#[cfg(test)]
pub(crate) fn rotation_count() -> usize {
    ROTATIONS.with(core::cell::Cell::get)
}

#[cfg(test)]
fn record_rotation() {
    ROTATIONS.with(|count| count.set(count.get() + 1));
}

#[cfg(not(test))]
fn record_rotation() {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::vec::Vec;

    use proptest::prelude::*;

    use super::super::delete::{delete, delmin};
    use super::super::insert::{InsertResult, insert};
    use super::super::node::{check, inorder};
    use super::*;

    fn singleton(key: i64) -> Tree<i64> {
        link(None, key, None, Gap::NoGap, Gap::NoGap)
    }

    #[test]
    fn single_rotation_right_after_growth() {
        // Pivot leans outward: left child one below, right child a leaf.
        let tall = link(singleton(1), 2, None, Gap::NoGap, Gap::Gap);
        let rotated = rotate_right(tall.unwrap(), 3, None, Imbalance::Grown);
        assert_eq!(check(&rotated), 2);
        assert_eq!(inorder(&rotated), [1, 2, 3]);
    }

    #[test]
    fn single_rotation_right_after_shrinkage() {
        // Same pivot shape, but the rebuilt root lands one level higher to
        // stand in for the caller's unshrunk height.
        let tall = link(singleton(1), 2, None, Gap::NoGap, Gap::Gap);
        let rotated = rotate_right(tall.unwrap(), 3, None, Imbalance::Shrunk);
        assert_eq!(check(&rotated), 3);
        assert_eq!(inorder(&rotated), [1, 2, 3]);
    }

    #[test]
    fn double_rotation_right_after_growth() {
        // Pivot leans inward: the middle key ends up at the root.
        let tall = link(None, 1, singleton(2), Gap::Gap, Gap::NoGap);
        let rotated = rotate_right(tall.unwrap(), 3, None, Imbalance::Grown);
        assert_eq!(check(&rotated), 2);
        assert_eq!(inorder(&rotated), [1, 2, 3]);
    }

    #[test]
    fn level_pivot_right_after_shrinkage() {
        let tall = link(singleton(1), 2, singleton(3), Gap::NoGap, Gap::NoGap);
        let rotated = rotate_right(tall.unwrap(), 4, None, Imbalance::Shrunk);
        assert_eq!(check(&rotated), 3);
        assert_eq!(inorder(&rotated), [1, 2, 3, 4]);
    }

    #[test]
    fn single_rotation_left_after_growth() {
        let tall = link(None, 2, singleton(3), Gap::Gap, Gap::NoGap);
        let rotated = rotate_left(None, 1, tall.unwrap(), Imbalance::Grown);
        assert_eq!(check(&rotated), 2);
        assert_eq!(inorder(&rotated), [1, 2, 3]);
    }

    #[test]
    fn double_rotation_left_after_growth() {
        let tall = link(singleton(2), 3, None, Gap::NoGap, Gap::Gap);
        let rotated = rotate_left(None, 1, tall.unwrap(), Imbalance::Grown);
        assert_eq!(check(&rotated), 2);
        assert_eq!(inorder(&rotated), [1, 2, 3]);
    }

    #[test]
    fn level_pivot_left_after_shrinkage() {
        let tall = link(singleton(2), 3, singleton(4), Gap::NoGap, Gap::NoGap);
        let rotated = rotate_left(None, 1, tall.unwrap(), Imbalance::Shrunk);
        assert_eq!(check(&rotated), 3);
        assert_eq!(inorder(&rotated), [1, 2, 3, 4]);
    }

    fn build(keys: impl IntoIterator<Item = i64>) -> Tree<i64> {
        let mut tree = None;
        for key in keys {
            if let InsertResult::Inserted(next, _) = insert(&tree, key) {
                tree = next;
            }
        }
        tree
    }

    proptest! {
        /// A single insertion into a balanced tree performs at most one
        /// rotation across the whole root-to-leaf path.
        #[test]
        fn insert_rotates_at_most_once(keys in prop::collection::btree_set(-10_000i64..10_000, 2..300)) {
            let keys: Vec<i64> = keys.into_iter().collect();
            let (&probe, rest) = keys.split_first().unwrap();

            let tree = build(rest.iter().copied());
            let before = rotation_count();
            let InsertResult::Inserted(next, _) = insert(&tree, probe) else {
                panic!("probe key was not in the tree");
            };
            prop_assert!(rotation_count() - before <= 1);
            check(&next);
        }

        /// A single deletion performs at most one rotation as well; the
        /// remaining fix-ups are bit flips and height lowerings.
        #[test]
        fn delete_rotates_at_most_once(
            keys in prop::collection::btree_set(-10_000i64..10_000, 1..300),
            pick in any::<prop::sample::Index>(),
        ) {
            let keys: Vec<i64> = keys.into_iter().collect();
            let victim = keys[pick.index(keys.len())];

            let tree = build(keys.iter().copied());
            let before = rotation_count();
            let (next, _) = delete(&tree, &victim).expect("victim key is present");
            prop_assert!(rotation_count() - before <= 1);
            check(&next);
        }

        /// Extracting the minimum never needs more than one rotation.
        #[test]
        fn delmin_rotates_at_most_once(keys in prop::collection::btree_set(-10_000i64..10_000, 1..300)) {
            let tree = build(keys.iter().copied());
            let before = rotation_count();
            let (min, rest, _) = delmin(&tree).expect("tree is non-empty");
            prop_assert!(rotation_count() - before <= 1);
            prop_assert_eq!(min, *keys.first().unwrap());
            check(&rest);
        }
    }

    /// Random interleavings keep the structure valid; model the key set
    /// with a `BTreeSet` and compare the in-order sequence at the end.
    proptest! {
        #[test]
        fn mixed_ops_stay_balanced(ops in prop::collection::vec((any::<bool>(), -100i64..100), 1..400)) {
            let mut tree: Tree<i64> = None;
            let mut model: BTreeSet<i64> = BTreeSet::new();

            for (is_insert, key) in ops {
                if is_insert {
                    if let InsertResult::Inserted(next, _) = insert(&tree, key) {
                        tree = next;
                    }
                    model.insert(key);
                } else {
                    if let Some((next, _)) = delete(&tree, &key) {
                        tree = next;
                    }
                    model.remove(&key);
                }
                check(&tree);
            }

            let expected: Vec<i64> = model.into_iter().collect();
            prop_assert_eq!(inorder(&tree), expected);
        }
    }
}
