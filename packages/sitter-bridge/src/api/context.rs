//! Per-host processing context
//!
//! Holds the scratch state every call shares: the transfer buffer results
//! are written to and the cursor traversals run on. Calls take it by
//! `&mut`, so two traversals can never interleave on the same context.

use crate::config::BridgeConfig;
use crate::errors::Result;
use crate::features::codec::{EncodedNode, MarshaledNode, TransferBuffer};
use crate::features::languages::BundledLanguage;
use crate::features::traversal::ScratchCursor;

#[derive(Debug)]
pub struct BridgeContext {
    config: BridgeConfig,
    pub(crate) buffer: TransferBuffer,
    pub(crate) cursor: ScratchCursor,
}

impl Default for BridgeContext {
    fn default() -> Self {
        Self {
            config: BridgeConfig::default(),
            buffer: TransferBuffer::default(),
            cursor: ScratchCursor::new(),
        }
    }
}

impl BridgeContext {
    /// Context for a validated configuration
    pub fn new(config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        BundledLanguage::from_name(&config.default_language)?;
        let buffer = TransferBuffer::with_node_capacity(config.initial_transfer_nodes as usize);
        tracing::debug!(
            encoding = %config.text_encoding,
            initial_nodes = buffer.node_capacity(),
            "bridge context created"
        );
        Ok(Self {
            config,
            buffer,
            cursor: ScratchCursor::new(),
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TransferBuffer {
        &self.buffer
    }

    /// Raw words of the last result. Re-acquire after every call.
    pub fn transfer_words(&self) -> &[u32] {
        self.buffer.view()
    }

    /// Handle behind one single-node result
    pub fn unpack_one(&self, result: &MarshaledNode) -> EncodedNode {
        self.unpack(std::slice::from_ref(result))
            .pop()
            .unwrap_or(EncodedNode::NULL)
    }

    /// Handles behind a batch result, reading fresh entries from their
    /// packed slots in order.
    pub fn unpack(&self, results: &[MarshaledNode]) -> Vec<EncodedNode> {
        let mut slot = 0;
        results
            .iter()
            .map(|result| match result {
                MarshaledNode::Null => EncodedNode::NULL,
                MarshaledNode::Cached(object) => object.encoded(),
                MarshaledNode::Fresh { .. } => {
                    let handle = self.buffer.read(slot).unwrap_or(EncodedNode::NULL);
                    slot += 1;
                    handle
                }
            })
            .collect()
    }
}
