//! Language-agnostic core API
//!
//! One function per operation the host can call. Everything here is plain
//! Rust; `adapters::pyo3` wraps it for Python.

pub mod context;
pub mod node_methods;
pub mod tree_methods;
pub mod walk;

pub use context::BridgeContext;
pub use walk::TreeWalk;
