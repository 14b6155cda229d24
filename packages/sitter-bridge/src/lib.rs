/*
 * sitter-bridge - tree-sitter node bindings for host runtimes
 *
 * Feature-First Architecture:
 * - shared/      : Host-facing positions and unit conversion
 * - features/    : codec, identity cache, traversal, symbols, trees, grammars
 * - api/         : Language-agnostic operations (one per host call)
 * - adapters/    : External bindings (PyO3)
 * - config/      : YAML configuration
 */

#![allow(clippy::too_many_arguments)] // Range accessors take start/end pairs
#![allow(clippy::new_without_default)] // Default impl not always needed

#[cfg(feature = "python")]
use pyo3::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

/// Error types
pub mod errors;

/// Configuration (YAML schema v1)
pub mod config;

/// Shared models and unit conversion
pub mod shared;

/// Codec, identity cache, traversal engine, trees
pub mod features;

/// Language-agnostic core API
pub mod api;

/// Host bindings
pub mod adapters;

pub use api::{BridgeContext, TreeWalk};
pub use config::{BridgeConfig, TextEncoding};
pub use errors::{BridgeError, Result};
pub use features::codec::{EncodedNode, MarshaledNode, FIELD_COUNT_PER_NODE};
pub use features::languages::BundledLanguage;
pub use features::tree::SyntaxTree;
pub use shared::models::{HostPoint, Point, Range, TextEdit};

// ═══════════════════════════════════════════════════════════════════════════
// Python Module Registration
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "python")]
#[pymodule]
fn sitter_bridge(_py: Python, m: &PyModule) -> PyResult<()> {
    // Value types
    m.add_class::<shared::models::Point>()?;
    m.add_class::<shared::models::Range>()?;

    // Bridge, Tree, Node, TreeCursor
    adapters::pyo3::register_bridge_api(m)?;

    m.add("FIELD_COUNT_PER_NODE", FIELD_COUNT_PER_NODE)?;
    Ok(())
}
