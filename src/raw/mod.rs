mod delete;
mod insert;
mod join;
mod node;
mod rotate;
mod search;

pub(crate) use delete::{Shrink, delete, delmax, delmin};
pub(crate) use insert::{HeightDelta, InsertResult, insert};
pub(crate) use join::join;
pub(crate) use node::Tree;
pub(crate) use search::find;

#[cfg(any(test, debug_assertions))]
pub(crate) use node::check;
