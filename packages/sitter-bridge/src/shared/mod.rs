//! Shared module - Common types and utilities
//!
//! Types that every feature uses: host-facing positions and unit conversion.

pub mod models;
pub mod units;

// Re-exports for convenience
pub use models::*;
pub use units::Units;
