//! Pruned preorder search by type
//!
//! Non-recursive: one cursor and a two-state machine. A subtree that ends
//! at or before the window start is skipped whole; the first node that
//! starts at or after the window end stops the walk, since everything after
//! it in preorder starts no earlier.

use tree_sitter::Point;

use super::walker::{point_lte, NodeView, TreeWalker};
use crate::features::symbols::SymbolSet;

/// Half-open point window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointWindow {
    pub start: Point,
    pub end: Point,
}

impl PointWindow {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// `(0,0)..(MAX,MAX)`
    pub fn unbounded() -> Self {
        Self::new(Point::new(0, 0), Point::new(usize::MAX, usize::MAX))
    }

    /// Whether `[node_start, node_end)` overlaps the window
    pub fn intersects(&self, node_start: Point, node_end: Point) -> bool {
        !point_lte(node_end, self.start) && !point_lte(self.end, node_start)
    }
}

impl Default for PointWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// Current node not yet examined
    Descending,
    /// Current node and its subtree already done
    Returning,
}

/// Every node in the cursor's subtree (the starting node included) whose
/// symbol is in `types` and whose range overlaps `window`, in preorder.
pub fn descendants_of_type<W: TreeWalker>(
    cursor: &mut W,
    types: &SymbolSet,
    window: PointWindow,
) -> Vec<W::Node> {
    let mut found = Vec::new();
    let mut state = WalkState::Descending;

    loop {
        match state {
            WalkState::Descending => {
                let node = cursor.current_node();

                if point_lte(node.end_point(), window.start) {
                    if !cursor.goto_next_sibling() {
                        if !cursor.goto_parent() {
                            break;
                        }
                        state = WalkState::Returning;
                    }
                    continue;
                }

                if point_lte(window.end, node.start_point()) {
                    break;
                }

                if types.contains(node.symbol()) {
                    found.push(node);
                }

                if cursor.goto_first_child() || cursor.goto_next_sibling() {
                    continue;
                }
                if !cursor.goto_parent() {
                    break;
                }
                state = WalkState::Returning;
            }
            WalkState::Returning => {
                if cursor.goto_next_sibling() {
                    state = WalkState::Descending;
                } else if !cursor.goto_parent() {
                    break;
                }
            }
        }
    }

    found
}
