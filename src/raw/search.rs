use core::cmp::Ordering;

use super::node::Tree;

/// Standard BST descent. Pure: no structural change, no height change.
pub(crate) fn find<K: Ord>(tree: &Tree<K>, key: &K) -> bool {
    let mut current = tree;
    while let Some(node) = current {
        match key.cmp(&node.key) {
            Ordering::Less => current = &node.left,
            Ordering::Equal => return true,
            Ordering::Greater => current = &node.right,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::super::node::{Gap, link};
    use super::*;

    #[test]
    fn find_in_small_tree() {
        let left = link(None, 1u32, None, Gap::NoGap, Gap::NoGap);
        let right = link(None, 5u32, None, Gap::NoGap, Gap::NoGap);
        let tree = link(left, 3, right, Gap::NoGap, Gap::NoGap);

        for present in [1, 3, 5] {
            assert!(find(&tree, &present));
        }
        for absent in [0, 2, 4, 6] {
            assert!(!find(&tree, &absent));
        }
    }

    #[test]
    fn find_in_leaf() {
        let leaf: Tree<u32> = None;
        assert!(!find(&leaf, &1));
    }
}
