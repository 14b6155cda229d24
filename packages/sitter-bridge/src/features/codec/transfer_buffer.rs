//! Transfer buffer
//!
//! One reusable word region holding the current batch of encoded nodes.
//! It only grows: a request for N nodes makes room for `6 * N` words and
//! the capacity stays at the largest request seen. Any slice obtained
//! through [`TransferBuffer::view`] is invalidated by the next call that may
//! grow the buffer; the borrow checker enforces the re-acquire.

use super::node_handle::{EncodedNode, FIELD_COUNT_PER_NODE};

#[derive(Debug)]
pub struct TransferBuffer {
    words: Vec<u32>,
}

impl Default for TransferBuffer {
    fn default() -> Self {
        Self::with_node_capacity(1)
    }
}

impl TransferBuffer {
    pub fn with_node_capacity(node_count: usize) -> Self {
        Self {
            words: vec![0; node_count.max(1) * FIELD_COUNT_PER_NODE],
        }
    }

    /// Capacity in nodes
    pub fn node_capacity(&self) -> usize {
        self.words.len() / FIELD_COUNT_PER_NODE
    }

    /// Make room for `node_count` nodes. Never shrinks.
    pub fn reserve_nodes(&mut self, node_count: usize) {
        let new_length = node_count * FIELD_COUNT_PER_NODE;
        if new_length > self.words.len() {
            tracing::trace!(
                old_nodes = self.node_capacity(),
                new_nodes = node_count,
                "growing transfer buffer"
            );
            self.words.resize(new_length, 0);
        }
    }

    /// Write one handle into slot `slot`. The slot must have been reserved.
    #[inline]
    pub fn write(&mut self, slot: usize, node: &EncodedNode) {
        let start = slot * FIELD_COUNT_PER_NODE;
        self.words[start..start + FIELD_COUNT_PER_NODE].copy_from_slice(node.words());
    }

    /// Zero slot 0 (the null-node encoding)
    pub fn write_null(&mut self) {
        self.write(0, &EncodedNode::NULL);
    }

    pub fn read(&self, slot: usize) -> Option<EncodedNode> {
        let start = slot * FIELD_COUNT_PER_NODE;
        self.words
            .get(start..start + FIELD_COUNT_PER_NODE)
            .and_then(|words| EncodedNode::from_words(words).ok())
    }

    /// Current contents. Re-acquire after any call that may grow the buffer.
    pub fn view(&self) -> &[u32] {
        &self.words
    }
}
