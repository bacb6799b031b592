use core::fmt;

use crate::raw::{self, HeightDelta, InsertResult, Shrink, Tree};

/// A persistent ordered search tree balanced by per-node gap bits.
///
/// Every mutating operation returns a **new** tree and leaves the receiver
/// untouched; the two trees share every subtree the operation did not
/// rebuild. Nodes are immutable once constructed, so any number of handles
/// may read overlapping trees concurrently without synchronization.
///
/// The balance discipline guarantees a height of at most `2·log2(n + 1)`
/// for `n` keys, and trees built purely by insertion satisfy the tighter
/// AVL bound `1.44·log2(n + 2)`. Each insertion or deletion performs at
/// most one rotation; all remaining fix-ups are single-bit adjustments or
/// height lowerings.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the tree. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The behavior
/// resulting from such a logic error is not specified, but will not result
/// in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use gap_tree::{GapTree, Insert};
///
/// let mut tree = GapTree::new();
/// for key in [3, 1, 4, 1, 5] {
///     if let Insert::Inserted(next) = tree.insert(key) {
///         tree = next;
///     }
/// }
///
/// assert!(tree.contains(&4));
/// assert!(!tree.contains(&2));
/// assert_eq!(tree.height(), 3);
/// ```
pub struct GapTree<K> {
    root: Tree<K>,
    height: usize,
}

/// Outcome of [`GapTree::insert`].
#[derive(Clone, Debug)]
pub enum Insert<K> {
    /// The key was already in the tree, which is returned unchanged by
    /// simply keeping the receiver.
    AlreadyPresent,
    /// A new tree containing the key.
    Inserted(GapTree<K>),
}

/// Outcome of [`GapTree::delete_min`] and [`GapTree::delete_max`].
#[derive(Clone, Debug)]
pub enum Extract<K> {
    /// The tree was empty; there is nothing to extract.
    Empty,
    /// The extracted extremal key and the tree without it.
    Extracted(K, GapTree<K>),
}

/// Outcome of [`GapTree::delete`].
#[derive(Clone, Debug)]
pub enum Delete<K> {
    /// The key is not in the tree.
    NotFound,
    /// A new tree without the key.
    Deleted(GapTree<K>),
}

impl<K> GapTree<K> {
    /// Creates an empty tree of height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: gap_tree::GapTree<i32> = gap_tree::GapTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            height: 0,
        }
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree. A leaf (the empty tree) has height
    /// 0; a tree of height `h` holds at least `2^(h/2)` keys.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

impl<K: Ord + Clone> GapTree<K> {
    /// Returns `true` if the tree contains the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use gap_tree::{GapTree, Insert};
    ///
    /// let empty = GapTree::new();
    /// let Insert::Inserted(tree) = empty.insert(7) else { unreachable!() };
    /// assert!(tree.contains(&7));
    /// assert!(!empty.contains(&7));
    /// ```
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        raw::find(&self.root, key)
    }

    /// Splits a non-empty tree into its left subtree, root key, and right
    /// subtree. Returns `None` on the empty tree.
    ///
    /// The returned subtrees are full-fledged handles sharing structure
    /// with `self`; together with [`GapTree::new`] and the mutating
    /// operations this is the entire construction surface an ordered-set
    /// library needs.
    ///
    /// # Examples
    ///
    /// ```
    /// use gap_tree::{GapTree, Insert};
    ///
    /// let mut tree = GapTree::new();
    /// for key in [2, 1, 3] {
    ///     if let Insert::Inserted(next) = tree.insert(key) {
    ///         tree = next;
    ///     }
    /// }
    ///
    /// let (left, key, right) = tree.break_node().unwrap();
    /// assert_eq!(*key, 2);
    /// assert!(left.contains(&1));
    /// assert!(right.contains(&3));
    /// ```
    #[must_use]
    pub fn break_node(&self) -> Option<(Self, &K, Self)> {
        let node = self.root.as_ref()?;
        let left = Self {
            root: node.left.clone(),
            height: self.height - node.lgap.step(),
        };
        let right = Self {
            root: node.right.clone(),
            height: self.height - node.rgap.step(),
        };
        Some((left, &node.key, right))
    }

    /// Inserts a key, returning the new tree. Duplicate keys are not
    /// stored: inserting a present key reports
    /// [`Insert::AlreadyPresent`] and builds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use gap_tree::{GapTree, Insert};
    ///
    /// let empty = GapTree::new();
    /// let Insert::Inserted(tree) = empty.insert(1) else { unreachable!() };
    /// assert!(matches!(tree.insert(1), Insert::AlreadyPresent));
    /// ```
    #[must_use]
    pub fn insert(&self, key: K) -> Insert<K> {
        match raw::insert(&self.root, key) {
            InsertResult::AlreadyPresent => Insert::AlreadyPresent,
            InsertResult::Inserted(root, delta) => {
                let height = match delta {
                    HeightDelta::SameHeight => self.height,
                    HeightDelta::Higher => self.height + 1,
                };
                Insert::Inserted(Self::rooted(root, height))
            }
        }
    }

    /// Merges `self`, a separator key, and `right` into one balanced tree.
    ///
    /// Every key in `self` must precede `separator`, and `separator` must
    /// precede every key in `right`; violating this is a programming error
    /// (checked in debug builds only). The inputs may have any heights;
    /// the merge costs time proportional to their height difference.
    ///
    /// # Examples
    ///
    /// ```
    /// use gap_tree::{GapTree, Insert};
    ///
    /// let Insert::Inserted(left) = GapTree::new().insert(1) else { unreachable!() };
    /// let Insert::Inserted(right) = GapTree::new().insert(9) else { unreachable!() };
    ///
    /// let joined = left.join(5, &right);
    /// for key in [1, 5, 9] {
    ///     assert!(joined.contains(&key));
    /// }
    /// ```
    #[must_use]
    pub fn join(&self, separator: K, right: &Self) -> Self {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.rightmost().is_none_or(|max| *max < separator),
                "every key of the left tree must precede the separator"
            );
            assert!(
                right.leftmost().is_none_or(|min| separator < *min),
                "the separator must precede every key of the right tree"
            );
        }

        let (root, height) = raw::join(
            self.root.clone(),
            self.height,
            separator,
            right.root.clone(),
            right.height,
        );
        Self::rooted(root, height)
    }

    /// Extracts the minimum key, returning it and the tree without it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gap_tree::{Extract, GapTree, Insert};
    ///
    /// let mut tree = GapTree::new();
    /// for key in [5, 3, 8] {
    ///     if let Insert::Inserted(next) = tree.insert(key) {
    ///         tree = next;
    ///     }
    /// }
    ///
    /// let Extract::Extracted(min, rest) = tree.delete_min() else { unreachable!() };
    /// assert_eq!(min, 3);
    /// assert!(!rest.contains(&3));
    /// ```
    #[must_use]
    pub fn delete_min(&self) -> Extract<K> {
        match raw::delmin(&self.root) {
            None => Extract::Empty,
            Some((min, root, shrink)) => {
                Extract::Extracted(min, Self::rooted(root, self.height - lowered(shrink)))
            }
        }
    }

    /// Extracts the maximum key, returning it and the tree without it.
    #[must_use]
    pub fn delete_max(&self) -> Extract<K> {
        match raw::delmax(&self.root) {
            None => Extract::Empty,
            Some((max, root, shrink)) => {
                Extract::Extracted(max, Self::rooted(root, self.height - lowered(shrink)))
            }
        }
    }

    /// Deletes a key, returning the new tree, or [`Delete::NotFound`] if
    /// the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use gap_tree::{Delete, GapTree, Insert};
    ///
    /// let Insert::Inserted(tree) = GapTree::new().insert(1) else { unreachable!() };
    ///
    /// let Delete::Deleted(empty) = tree.delete(&1) else { unreachable!() };
    /// assert!(empty.is_empty());
    /// assert!(matches!(tree.delete(&2), Delete::NotFound));
    /// ```
    #[must_use]
    pub fn delete(&self, key: &K) -> Delete<K> {
        match raw::delete(&self.root, key) {
            None => Delete::NotFound,
            Some((root, shrink)) => {
                Delete::Deleted(Self::rooted(root, self.height - lowered(shrink)))
            }
        }
    }

    /// Wraps an operation result, re-verifying the balance and ordering
    /// invariants in debug builds.
    fn rooted(root: Tree<K>, height: usize) -> Self {
        let tree = Self { root, height };
        tree.verify();
        tree
    }

    #[cfg(debug_assertions)]
    fn verify(&self) {
        assert_eq!(
            raw::check(&self.root),
            self.height,
            "operation result violates the balance invariant"
        );
    }

    #[cfg(not(debug_assertions))]
    fn verify(&self) {}

    #[cfg(debug_assertions)]
    fn leftmost(&self) -> Option<&K> {
        let mut node = self.root.as_ref()?;
        while let Some(next) = node.left.as_ref() {
            node = next;
        }
        Some(&node.key)
    }

    #[cfg(debug_assertions)]
    fn rightmost(&self) -> Option<&K> {
        let mut node = self.root.as_ref()?;
        while let Some(next) = node.right.as_ref() {
            node = next;
        }
        Some(&node.key)
    }
}

impl<K> Clone for GapTree<K> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            height: self.height,
        }
    }
}

impl<K> Default for GapTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for GapTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn entries<K: fmt::Debug>(tree: &Tree<K>, set: &mut fmt::DebugSet<'_, '_>) {
            if let Some(node) = tree {
                entries(&node.left, set);
                set.entry(&node.key);
                entries(&node.right, set);
            }
        }

        f.write_str("GapTree")?;
        let mut set = f.debug_set();
        entries(&self.root, &mut set);
        set.finish()
    }
}

const fn lowered(shrink: Shrink) -> usize {
    match shrink {
        Shrink::SameHeight => 0,
        Shrink::LoweredByOne => 1,
    }
}
