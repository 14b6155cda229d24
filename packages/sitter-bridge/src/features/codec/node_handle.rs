//! Wire form of a node handle
//!
//! Layout: `[id_lo, id_hi, ctx0, ctx1, ctx2, ctx3]`. The id is the engine's
//! opaque subtree address and the context words are the engine's cached
//! position data; neither is interpreted here.

use std::ffi::c_void;

use tree_sitter::{ffi, Node, Tree};

use crate::errors::{BridgeError, Result};

/// Words per encoded node
pub const FIELD_COUNT_PER_NODE: usize = 6;

/// Opaque engine node id, both words joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const NULL: NodeId = NodeId(0);

    pub fn from_words(lo: u32, hi: u32) -> Self {
        Self(u64::from(lo) | (u64::from(hi) << 32))
    }

    pub fn lo(self) -> u32 {
        self.0 as u32
    }

    pub fn hi(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Id of a live engine node
    pub fn of(node: Node<'_>) -> Self {
        Self(node.into_raw().id as usize as u64)
    }
}

/// Six-word encoded node handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncodedNode(pub [u32; FIELD_COUNT_PER_NODE]);

impl EncodedNode {
    pub const NULL: EncodedNode = EncodedNode([0; FIELD_COUNT_PER_NODE]);

    /// Encode a live engine node
    pub fn from_node(node: Node<'_>) -> Self {
        let raw = node.into_raw();
        let id = NodeId::of(node);
        Self([
            id.lo(),
            id.hi(),
            raw.context[0],
            raw.context[1],
            raw.context[2],
            raw.context[3],
        ])
    }

    /// Read one handle from the front of a word slice
    pub fn from_words(words: &[u32]) -> Result<Self> {
        let words: [u32; FIELD_COUNT_PER_NODE] = words
            .get(..FIELD_COUNT_PER_NODE)
            .and_then(|w| w.try_into().ok())
            .ok_or_else(|| {
                BridgeError::invalid_argument(format!(
                    "Node handle must be {} words, got {}",
                    FIELD_COUNT_PER_NODE,
                    words.len()
                ))
            })?;
        Ok(Self(words))
    }

    pub fn words(&self) -> &[u32; FIELD_COUNT_PER_NODE] {
        &self.0
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::from_words(self.0[0], self.0[1])
    }

    pub fn context(&self) -> [u32; 4] {
        [self.0[2], self.0[3], self.0[4], self.0[5]]
    }

    pub fn is_null(&self) -> bool {
        self.node_id().is_null()
    }

    /// Engine byte offset the node started at when it was encoded
    pub fn start_byte(&self) -> usize {
        self.0[2] as usize
    }

    /// Find the node these words name inside `tree`.
    ///
    /// The words are never dereferenced: the tree is walked from its root,
    /// pruned to nodes covering the recorded start byte, until a node with
    /// the same id turns up. Words naming no node of `tree` are rejected.
    pub fn resolve<'t>(&self, tree: &'t Tree) -> Result<Option<Node<'t>>> {
        if self.is_null() {
            return Ok(None);
        }
        let id = self.node_id();
        let start = self.start_byte();

        let mut cursor = tree.walk();
        'walk: loop {
            let node = cursor.node();
            // Preorder: nothing after this starts earlier.
            if node.start_byte() > start {
                break;
            }
            if start <= node.end_byte() {
                if node.start_byte() == start && NodeId::of(node) == id {
                    return Ok(Some(node));
                }
                if cursor.goto_first_child() {
                    continue;
                }
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        Err(BridgeError::invalid_argument(format!(
            "Node handle {:#x}@{} does not belong to this tree",
            id.0, start
        )))
    }

    /// Rebuild the live node inside `tree` without looking it up.
    ///
    /// # Safety
    ///
    /// The handle must have been produced by [`EncodedNode::from_node`] for a
    /// node of `tree` (possibly refreshed by an edit of that same tree).
    pub(crate) unsafe fn bind<'t>(&self, tree: &'t Tree) -> Option<Node<'t>> {
        if self.is_null() {
            return None;
        }
        let raw = ffi::TSNode {
            context: self.context(),
            id: self.node_id().0 as usize as *const c_void,
            tree: tree.root_node().into_raw().tree,
        };
        Some(Node::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_splits_into_words() {
        let id = NodeId(0x0000_7fff_dead_beef);
        assert_eq!(id.lo(), 0xdead_beef);
        assert_eq!(id.hi(), 0x0000_7fff);
        assert_eq!(NodeId::from_words(id.lo(), id.hi()), id);
    }

    #[test]
    fn test_null_handle_is_all_zero() {
        assert!(EncodedNode::NULL.is_null());
        assert_eq!(EncodedNode::NULL.words(), &[0; 6]);
    }

    #[test]
    fn test_zero_id_is_null_whatever_the_context() {
        let handle = EncodedNode([0, 0, 4, 5, 6, 7]);
        assert!(handle.is_null());
    }

    #[test]
    fn test_short_word_slice_is_rejected() {
        let err = EncodedNode::from_words(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgumentType(_)));
    }

    #[test]
    fn test_from_words_reads_first_slot_only() {
        let words = [1, 2, 3, 4, 5, 6, 7, 8];
        let handle = EncodedNode::from_words(&words).unwrap();
        assert_eq!(handle.node_id(), NodeId::from_words(1, 2));
        assert_eq!(handle.context(), [3, 4, 5, 6]);
    }

    fn python_tree(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_python::language()).unwrap();
        parser.parse(source, None).unwrap()
    }

    fn preorder(tree: &Tree) -> Vec<Node<'_>> {
        let mut nodes = Vec::new();
        let mut stack = vec![tree.root_node()];
        let mut cursor = tree.walk();
        while let Some(node) = stack.pop() {
            nodes.push(node);
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        nodes
    }

    #[test]
    fn test_resolve_finds_every_node() {
        let tree = python_tree("def f(a):\n    return g(a, 1)\n\nx = f(2)\n");
        for node in preorder(&tree) {
            let resolved = EncodedNode::from_node(node).resolve(&tree).unwrap();
            assert_eq!(resolved, Some(node));
        }
    }

    #[test]
    fn test_resolve_null_is_none() {
        let tree = python_tree("pass\n");
        assert!(EncodedNode::NULL.resolve(&tree).unwrap().is_none());
    }

    #[test]
    fn test_resolve_rejects_forged_words() {
        let tree = python_tree("x = 1\n");
        for forged in [
            EncodedNode([0x1000, 0, 0, 0, 0, 0]),
            EncodedNode([0x1000, 0, 9999, 0, 0, 0]),
            EncodedNode([0xdead_beef, 0x7fff, 4, 0, 4, 0]),
        ] {
            let err = forged.resolve(&tree).unwrap_err();
            assert!(matches!(err, BridgeError::InvalidArgumentType(_)));
        }
    }

    #[test]
    fn test_resolve_rejects_handle_of_another_tree() {
        let left = python_tree("x = 1\n");
        let right = python_tree("x = 1\n");
        let handle = EncodedNode::from_node(left.root_node().child(0).unwrap());
        assert!(handle.resolve(&right).is_err());
        assert!(handle.resolve(&left).unwrap().is_some());
    }

    #[test]
    fn test_start_byte_is_first_context_word() {
        let tree = python_tree("a = 1\nb = 2\n");
        let second = tree.root_node().child(1).unwrap();
        assert_eq!(EncodedNode::from_node(second).start_byte(), second.start_byte());
    }
}
