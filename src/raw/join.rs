use super::insert::{HeightDelta, grow_left, grow_right};
use super::node::{Gap, Tree, link, unshare};

/// Merges two order-disjoint trees around a separator key.
///
/// Precondition: every key in `left` precedes `separator`, which precedes
/// every key in `right`. No height relation between the inputs is required;
/// the heights are taken as arguments because nodes do not store them.
/// Returns the merged tree and its height, which is `max(lh, rh)` or one
/// more.
pub(crate) fn join<K: Clone>(
    left: Tree<K>,
    lh: usize,
    separator: K,
    right: Tree<K>,
    rh: usize,
) -> (Tree<K>, usize) {
    if lh > rh + 1 {
        let (tree, delta) = join_right(left, lh, separator, right, rh);
        (tree, lh + grew(delta))
    } else if rh > lh + 1 {
        let (tree, delta) = join_left(left, lh, separator, right, rh);
        (tree, rh + grew(delta))
    } else {
        // Heights within one of each other: bridge with a single new node,
        // the shorter side (if any) sitting behind a gap.
        let (lgap, rgap) = match lh.cmp(&rh) {
            core::cmp::Ordering::Equal => (Gap::NoGap, Gap::NoGap),
            core::cmp::Ordering::Greater => (Gap::NoGap, Gap::Gap),
            core::cmp::Ordering::Less => (Gap::Gap, Gap::NoGap),
        };
        (link(left, separator, right, lgap, rgap), lh.max(rh) + 1)
    }
}

const fn grew(delta: HeightDelta) -> usize {
    match delta {
        HeightDelta::SameHeight => 0,
        HeightDelta::Higher => 1,
    }
}

/// Descends the right spine of the taller left input until the running
/// height is within one of `rh`, bridges there, and rebuilds upward with
/// insertion's rebalance: joining is inserting a whole subtree.
fn join_right<K: Clone>(
    tree: Tree<K>,
    height: usize,
    separator: K,
    right: Tree<K>,
    rh: usize,
) -> (Tree<K>, HeightDelta) {
    debug_assert!(height > rh + 1);
    let node = unshare(tree.expect("the taller side of a join is never a leaf"));
    let child_height = height - node.rgap.step();

    if child_height <= rh + 1 {
        // Attach point: the bridge stands one above the spine subtree it
        // replaces, exactly like a subtree that grew by an insertion.
        let bridged = if child_height == rh {
            link(node.right, separator, right, Gap::NoGap, Gap::NoGap)
        } else {
            link(node.right, separator, right, Gap::NoGap, Gap::Gap)
        };
        grow_right(node.left, node.key, bridged, node.lgap, node.rgap)
    } else {
        let (grown, delta) = join_right(node.right, child_height, separator, right, rh);
        match delta {
            HeightDelta::SameHeight => (
                link(node.left, node.key, grown, node.lgap, node.rgap),
                HeightDelta::SameHeight,
            ),
            HeightDelta::Higher => grow_right(node.left, node.key, grown, node.lgap, node.rgap),
        }
    }
}

/// Mirror image of [`join_right`]: descends the left spine of the taller
/// right input.
fn join_left<K: Clone>(
    left: Tree<K>,
    lh: usize,
    separator: K,
    tree: Tree<K>,
    height: usize,
) -> (Tree<K>, HeightDelta) {
    debug_assert!(height > lh + 1);
    let node = unshare(tree.expect("the taller side of a join is never a leaf"));
    let child_height = height - node.lgap.step();

    if child_height <= lh + 1 {
        let bridged = if child_height == lh {
            link(left, separator, node.left, Gap::NoGap, Gap::NoGap)
        } else {
            link(left, separator, node.left, Gap::Gap, Gap::NoGap)
        };
        grow_left(bridged, node.key, node.right, node.lgap, node.rgap)
    } else {
        let (grown, delta) = join_left(left, lh, separator, node.left, child_height);
        match delta {
            HeightDelta::SameHeight => (
                link(grown, node.key, node.right, node.lgap, node.rgap),
                HeightDelta::SameHeight,
            ),
            HeightDelta::Higher => grow_left(grown, node.key, node.right, node.lgap, node.rgap),
        }
    }
}
