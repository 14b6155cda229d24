//! Cursor traversal engine
//!
//! Every walk here is written against [`TreeWalker`]/[`NodeView`], runs on
//! one cursor, and never recurses.

pub mod children;
pub mod closest;
pub mod descendants;
pub mod walker;

#[cfg(test)]
pub(crate) mod testing;

pub use children::{children, children_for_field_id, named_children};
pub use closest::closest;
pub use descendants::{descendants_of_type, PointWindow};
pub use walker::{point_lte, BoundCursor, NodeView, ScratchCursor, TreeWalker};
