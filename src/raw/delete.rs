use core::cmp::Ordering;

use super::node::{Gap, Node, Tree, link, unshare};
use super::rotate::{Imbalance, rotate_left, rotate_right};

/// How a rebuilt subtree's height relates to the one it replaced after a
/// deletion. As with insertion, `SameHeight` stops all further rebalancing
/// on the way up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Shrink {
    SameHeight,
    LoweredByOne,
}

/// Extracts the minimum key. Returns `None` on the empty tree.
pub(crate) fn delmin<K: Clone>(tree: &Tree<K>) -> Option<(K, Tree<K>, Shrink)> {
    let node = tree.as_ref()?;
    match delmin(&node.left) {
        // Leftmost node: splice in its right child, one level down.
        None => Some((node.key.clone(), node.right.clone(), Shrink::LoweredByOne)),
        Some((min, left, Shrink::SameHeight)) => Some((
            min,
            link(
                left,
                node.key.clone(),
                node.right.clone(),
                node.lgap,
                node.rgap,
            ),
            Shrink::SameHeight,
        )),
        Some((min, left, Shrink::LoweredByOne)) => {
            let (tree, shrink) = shrink_left(
                left,
                node.key.clone(),
                node.right.clone(),
                node.lgap,
                node.rgap,
            );
            Some((min, tree, shrink))
        }
    }
}

/// Mirror image of [`delmin`]: extracts the maximum key.
pub(crate) fn delmax<K: Clone>(tree: &Tree<K>) -> Option<(K, Tree<K>, Shrink)> {
    let node = tree.as_ref()?;
    match delmax(&node.right) {
        None => Some((node.key.clone(), node.left.clone(), Shrink::LoweredByOne)),
        Some((max, right, Shrink::SameHeight)) => Some((
            max,
            link(
                node.left.clone(),
                node.key.clone(),
                right,
                node.lgap,
                node.rgap,
            ),
            Shrink::SameHeight,
        )),
        Some((max, right, Shrink::LoweredByOne)) => {
            let (tree, shrink) = shrink_right(
                node.left.clone(),
                node.key.clone(),
                right,
                node.lgap,
                node.rgap,
            );
            Some((max, tree, shrink))
        }
    }
}

/// Deletes `key`. Returns `None` when the key is absent.
pub(crate) fn delete<K: Ord + Clone>(tree: &Tree<K>, key: &K) -> Option<(Tree<K>, Shrink)> {
    let node = tree.as_ref()?;
    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, shrink) = delete(&node.left, key)?;
            Some(match shrink {
                Shrink::SameHeight => (
                    link(
                        left,
                        node.key.clone(),
                        node.right.clone(),
                        node.lgap,
                        node.rgap,
                    ),
                    Shrink::SameHeight,
                ),
                Shrink::LoweredByOne => shrink_left(
                    left,
                    node.key.clone(),
                    node.right.clone(),
                    node.lgap,
                    node.rgap,
                ),
            })
        }
        Ordering::Greater => {
            let (right, shrink) = delete(&node.right, key)?;
            Some(match shrink {
                Shrink::SameHeight => (
                    link(
                        node.left.clone(),
                        node.key.clone(),
                        right,
                        node.lgap,
                        node.rgap,
                    ),
                    Shrink::SameHeight,
                ),
                Shrink::LoweredByOne => shrink_right(
                    node.left.clone(),
                    node.key.clone(),
                    right,
                    node.lgap,
                    node.rgap,
                ),
            })
        }
        Ordering::Equal => Some(remove_root(node)),
    }
}

/// Removes the key held by `node` itself.
///
/// A node with a leaf child collapses to the other child. An interior node
/// with two real children takes its replacement key from a side chosen by
/// the gap bits: extracting from a gap-free side lets this node absorb the
/// shrink with a bit flip or a lowering, never a rotation.
fn remove_root<K: Clone>(node: &Node<K>) -> (Tree<K>, Shrink) {
    if node.left.is_none() {
        return (node.right.clone(), Shrink::LoweredByOne);
    }
    if node.right.is_none() {
        return (node.left.clone(), Shrink::LoweredByOne);
    }

    if node.lgap == Gap::NoGap {
        let (key, left, shrink) = delmax(&node.left).expect("left child is not a leaf");
        match shrink {
            Shrink::SameHeight => (
                link(left, key, node.right.clone(), node.lgap, node.rgap),
                Shrink::SameHeight,
            ),
            Shrink::LoweredByOne => {
                shrink_left(left, key, node.right.clone(), node.lgap, node.rgap)
            }
        }
    } else {
        let (key, right, shrink) = delmin(&node.right).expect("right child is not a leaf");
        match shrink {
            Shrink::SameHeight => (
                link(node.left.clone(), key, right, node.lgap, node.rgap),
                Shrink::SameHeight,
            ),
            Shrink::LoweredByOne => {
                shrink_right(node.left.clone(), key, right, node.lgap, node.rgap)
            }
        }
    }
}

/// Rebuilds a node whose left subtree shrank by one level.
///
/// Mirrors insertion's fit-or-rotate analysis for shrinkage, with the two
/// extra moves a gap tree has over AVL: try-lowering when both sides carry
/// gaps, and lowering the sibling together with the node when the sibling
/// is itself doubly gapped and so cannot donate height through a rotation.
fn shrink_left<K: Clone>(
    shrunk: Tree<K>,
    key: K,
    right: Tree<K>,
    lgap: Gap,
    rgap: Gap,
) -> (Tree<K>, Shrink) {
    match (lgap, rgap) {
        (Gap::NoGap, _) => {
            if shrunk.is_none() && right.is_none() {
                // A height-2 node lost its last grandchild; a leaf pair
                // cannot carry gaps, so the node drops to height 1.
                (
                    link(None, key, None, Gap::NoGap, Gap::NoGap),
                    Shrink::LoweredByOne,
                )
            } else {
                (link(shrunk, key, right, Gap::Gap, rgap), Shrink::SameHeight)
            }
        }
        (Gap::Gap, Gap::Gap) => {
            // Try-lowering: both sides carry gaps, so the node itself comes
            // down one level instead of rotating.
            (
                link(shrunk, key, right, Gap::Gap, Gap::NoGap),
                Shrink::LoweredByOne,
            )
        }
        (Gap::Gap, Gap::NoGap) => {
            let sibling = right.expect("the sibling two levels up is never a leaf");
            if sibling.avlish() {
                (
                    rotate_left(shrunk, key, sibling, Imbalance::Shrunk),
                    Shrink::SameHeight,
                )
            } else {
                let s = unshare(sibling);
                let lowered = link(s.left, s.key, s.right, Gap::NoGap, Gap::NoGap);
                (
                    link(shrunk, key, lowered, Gap::Gap, Gap::NoGap),
                    Shrink::LoweredByOne,
                )
            }
        }
    }
}

/// Mirror image of [`shrink_left`] for a shrunken right subtree.
fn shrink_right<K: Clone>(
    left: Tree<K>,
    key: K,
    shrunk: Tree<K>,
    lgap: Gap,
    rgap: Gap,
) -> (Tree<K>, Shrink) {
    match (lgap, rgap) {
        (_, Gap::NoGap) => {
            if left.is_none() && shrunk.is_none() {
                (
                    link(None, key, None, Gap::NoGap, Gap::NoGap),
                    Shrink::LoweredByOne,
                )
            } else {
                (link(left, key, shrunk, lgap, Gap::Gap), Shrink::SameHeight)
            }
        }
        (Gap::Gap, Gap::Gap) => (
            link(left, key, shrunk, Gap::NoGap, Gap::Gap),
            Shrink::LoweredByOne,
        ),
        (Gap::NoGap, Gap::Gap) => {
            let sibling = left.expect("the sibling two levels up is never a leaf");
            if sibling.avlish() {
                (
                    rotate_right(sibling, key, shrunk, Imbalance::Shrunk),
                    Shrink::SameHeight,
                )
            } else {
                let s = unshare(sibling);
                let lowered = link(s.left, s.key, s.right, Gap::NoGap, Gap::NoGap);
                (
                    link(lowered, key, shrunk, Gap::NoGap, Gap::Gap),
                    Shrink::LoweredByOne,
                )
            }
        }
    }
}
