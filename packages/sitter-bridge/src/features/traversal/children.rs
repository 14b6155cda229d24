//! Sibling walks over a node's direct children

use super::walker::{NodeView, TreeWalker};

fn collect<W, F>(cursor: &mut W, mut keep: F) -> Vec<W::Node>
where
    W: TreeWalker,
    F: FnMut(&W) -> bool,
{
    let mut found = Vec::new();
    if cursor.goto_first_child() {
        loop {
            if keep(cursor) {
                found.push(cursor.current_node());
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    found
}

/// All children of the cursor's node, left to right
pub fn children<W: TreeWalker>(cursor: &mut W) -> Vec<W::Node> {
    collect(cursor, |_| true)
}

pub fn named_children<W: TreeWalker>(cursor: &mut W) -> Vec<W::Node> {
    collect(cursor, |c| c.current_node().is_named())
}

/// Children attached under `field_id` (0 selects children with no field)
pub fn children_for_field_id<W: TreeWalker>(cursor: &mut W, field_id: u16) -> Vec<W::Node> {
    collect(cursor, |c| c.current_field_id() == field_id)
}
