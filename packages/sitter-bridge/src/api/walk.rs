//! Owned tree cursor
//!
//! Unlike the context's scratch cursor, a `TreeWalk` keeps its position
//! between calls. It remembers which tree (and which edit generation of
//! it) it was positioned in and refuses to move inside anything else.

use tree_sitter::Node;

use super::context::BridgeContext;
use crate::errors::{BridgeError, Result};
use crate::features::codec::{decode, encode, EncodedNode, MarshaledNode};
use crate::features::traversal::{BoundCursor, ScratchCursor, TreeWalker};
use crate::features::tree::{SyntaxTree, TreeId};

#[derive(Debug)]
pub struct TreeWalk {
    cursor: ScratchCursor,
    tree: TreeId,
    generation: u64,
}

impl TreeWalk {
    pub fn new(tree: &SyntaxTree, node: Node<'_>) -> Self {
        let mut cursor = ScratchCursor::new();
        cursor.reset(node);
        Self {
            cursor,
            tree: tree.id(),
            generation: tree.generation(),
        }
    }

    fn bound<'c, 't>(&'c mut self, tree: &'t SyntaxTree) -> Result<BoundCursor<'c, 't>> {
        if tree.id() != self.tree {
            return Err(BridgeError::invalid_argument("Cursor belongs to a different tree"));
        }
        if tree.generation() != self.generation {
            return Err(BridgeError::invalid_argument(
                "Tree was edited since the cursor was positioned",
            ));
        }
        // SAFETY: same tree, no edits since the last reset.
        unsafe { self.cursor.resume(tree.inner()) }
            .ok_or_else(|| BridgeError::invalid_argument("Cursor was never positioned"))
    }

    /// Re-position on `handle` (which may belong to another tree)
    pub fn reset(&mut self, tree: &SyntaxTree, handle: &EncodedNode) -> Result<()> {
        let node = decode(handle, Some(tree))?
            .ok_or_else(|| BridgeError::invalid_argument("Cannot reset a cursor to the null node"))?;
        self.cursor.reset(node);
        self.tree = tree.id();
        self.generation = tree.generation();
        Ok(())
    }

    pub fn goto_first_child(&mut self, tree: &SyntaxTree) -> Result<bool> {
        Ok(self.bound(tree)?.goto_first_child())
    }

    pub fn goto_next_sibling(&mut self, tree: &SyntaxTree) -> Result<bool> {
        Ok(self.bound(tree)?.goto_next_sibling())
    }

    pub fn goto_parent(&mut self, tree: &SyntaxTree) -> Result<bool> {
        Ok(self.bound(tree)?.goto_parent())
    }

    /// Field id of the current node within its parent, 0 for none
    pub fn current_field_id(&mut self, tree: &SyntaxTree) -> Result<u16> {
        Ok(self.bound(tree)?.current_field_id())
    }

    pub fn current_node(&mut self, ctx: &mut BridgeContext, tree: &SyntaxTree) -> Result<MarshaledNode> {
        let node = self.bound(tree)?.current_node();
        Ok(encode(&mut ctx.buffer, tree, Some(node)))
    }
}
