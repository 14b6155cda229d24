//! Common test utilities for sitter-bridge
//!
//! Fixture sources, parse helpers and result assertions shared by the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
