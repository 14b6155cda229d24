//! Feature modules
//!
//! - codec: node handles to and from transfer-buffer words
//! - identity: one wrapper per (tree, node id)
//! - traversal: cursor-driven walks
//! - symbols: type-name resolution for traversal filters
//! - tree: syntax trees, edits and node caching
//! - languages: bundled grammars

pub mod codec;
pub mod identity;
pub mod languages;
pub mod symbols;
pub mod traversal;
pub mod tree;
