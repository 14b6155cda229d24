//! PyO3 adapter - Python bindings
//!
//! ```python
//! import sitter_bridge
//!
//! bridge = sitter_bridge.Bridge()
//! tree = bridge.parse("python", "def f():\n    return 1\n")
//! root = tree.root_node
//! names = root.descendants_of_type(["identifier"])
//! ```
//!
//! Every class here is `unsendable`: wrappers share `Rc` state with their
//! tree and must stay on the thread that created them.

pub mod bridge;
pub mod node;

use pyo3::prelude::*;

pub use bridge::{PyBridge, PyTree};
pub use node::{PyNode, PyTreeCursor};

pub fn register_bridge_api(m: &PyModule) -> PyResult<()> {
    m.add_class::<PyBridge>()?;
    m.add_class::<PyTree>()?;
    m.add_class::<PyNode>()?;
    m.add_class::<PyTreeCursor>()?;
    Ok(())
}
