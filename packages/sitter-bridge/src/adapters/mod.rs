//! Inbound adapters - host runtimes calling into the bridge
//!
//! Currently: PyO3 (Python bindings)

#[cfg(feature = "python")]
pub mod pyo3;
