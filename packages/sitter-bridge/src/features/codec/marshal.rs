//! Encode nodes into the transfer buffer, decode handles back into nodes
//!
//! Encoding consults the tree's identity cache first. A node that already
//! has a wrapper comes back as that wrapper and takes no buffer slot; every
//! other node is written to the next free slot, so fresh nodes are packed
//! in result order and the host consumes them six words at a time.

use std::rc::Rc;

use tree_sitter::Node;

use super::node_handle::EncodedNode;
use super::transfer_buffer::TransferBuffer;
use crate::errors::{BridgeError, Result};
use crate::features::identity::NodeObject;
use crate::features::tree::SyntaxTree;

/// Per-node result of an encode
#[derive(Debug, Clone)]
pub enum MarshaledNode {
    /// The null node; its slot holds six zero words
    Null,
    /// Bits written to the next buffer slot; carries the node's symbol
    Fresh { symbol: u16 },
    /// The wrapper already materialized for this node
    Cached(Rc<NodeObject>),
}

impl MarshaledNode {
    pub fn is_null(&self) -> bool {
        matches!(self, MarshaledNode::Null)
    }

    pub fn cached(&self) -> Option<&Rc<NodeObject>> {
        match self {
            MarshaledNode::Cached(object) => Some(object),
            _ => None,
        }
    }
}

/// Encode one node (or the null node) into slot 0
pub fn encode(buffer: &mut TransferBuffer, tree: &SyntaxTree, node: Option<Node<'_>>) -> MarshaledNode {
    let Some(node) = node else {
        return encode_null(buffer);
    };

    let encoded = EncodedNode::from_node(node);
    if let Some(object) = tree.identity_cache().lookup(encoded.node_id()) {
        return MarshaledNode::Cached(object);
    }

    buffer.reserve_nodes(1);
    buffer.write(0, &encoded);
    MarshaledNode::Fresh {
        symbol: node.kind_id(),
    }
}

/// Encode a batch; the buffer is sized once for the whole batch
pub fn encode_batch(
    buffer: &mut TransferBuffer,
    tree: &SyntaxTree,
    nodes: &[Node<'_>],
) -> Vec<MarshaledNode> {
    buffer.reserve_nodes(nodes.len());
    let cache = tree.identity_cache();

    let mut slot = 0;
    nodes
        .iter()
        .map(|&node| {
            let encoded = EncodedNode::from_node(node);
            if let Some(object) = cache.lookup(encoded.node_id()) {
                return MarshaledNode::Cached(object);
            }
            buffer.write(slot, &encoded);
            slot += 1;
            MarshaledNode::Fresh {
                symbol: node.kind_id(),
            }
        })
        .collect()
}

/// The null-node encoding: slot 0 zeroed
pub fn encode_null(buffer: &mut TransferBuffer) -> MarshaledNode {
    buffer.write_null();
    MarshaledNode::Null
}

/// Bind a handle to `tree`. Handles do not say which tree they belong to,
/// so a missing tree is an error rather than a guess, and words that name
/// no node of `tree` are rejected.
pub fn decode<'t>(handle: &EncodedNode, tree: Option<&'t SyntaxTree>) -> Result<Option<Node<'t>>> {
    let tree = tree.ok_or(BridgeError::InvalidTreeArgument)?;
    handle.resolve(tree.inner())
}
