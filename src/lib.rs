//! Persistent ordered search trees balanced by per-node gap bits.
//!
//! This crate provides [`GapTree`], a purely functional binary search tree
//! with worst-case logarithmic height. Instead of AVL's balance factors or
//! red-black coloring, every node carries two one-bit markers, one per
//! child, recording whether that child hangs one or two levels below the
//! node. The markers are enough to rebalance every mutation with O(1)
//! structural work: at most one rotation, one local bit adjustment, or one
//! height lowering per operation.
//!
//! # Example
//!
//! ```
//! use gap_tree::{Delete, GapTree, Insert};
//!
//! let mut tree = GapTree::new();
//! for key in [30, 10, 20, 50, 40] {
//!     if let Insert::Inserted(next) = tree.insert(key) {
//!         tree = next;
//!     }
//! }
//!
//! assert!(tree.contains(&20));
//! assert!(!tree.contains(&25));
//!
//! // Operations never mutate existing nodes, so old handles stay valid.
//! let Delete::Deleted(pruned) = tree.delete(&20) else { unreachable!() };
//! assert!(!pruned.contains(&20));
//! assert!(tree.contains(&20));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Persistent** - Every mutation returns a new handle and shares all
//!   untouched subtrees with the input; many versions coexist cheaply
//! - **O(log n) worst case** - Height is at most `2·log2(n+1)`, and trees
//!   built by insertion alone satisfy the tighter AVL bound `1.44·log2(n+2)`
//! - **Joinable** - [`GapTree::join`] merges two order-disjoint trees around
//!   a separator key, the primitive for set union/intersection/split
//!   libraries built on top
//!
//! # Implementation
//!
//! Nodes are immutable and reference counted; each holds one key, two child
//! links, and the two gap bits. Heights are never stored in nodes; the tree
//! handle caches the root height and every operation reports how the height
//! of each rebuilt subtree relates to the one it replaced, so rebalancing
//! decisions are purely local bit inspections.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod raw;

pub mod gap_tree;

pub use gap_tree::{Delete, Extract, GapTree, Insert};
