//! Node codec: handles <-> transfer-buffer words

pub mod marshal;
pub mod node_handle;
pub mod transfer_buffer;

pub use marshal::{decode, encode, encode_batch, encode_null, MarshaledNode};
pub use node_handle::{EncodedNode, NodeId, FIELD_COUNT_PER_NODE};
pub use transfer_buffer::TransferBuffer;
