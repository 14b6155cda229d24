//! Configuration
//!
//! Loaded from YAML (schema v1) or built in code:
//!
//! ```rust,ignore
//! use sitter_bridge::config::{BridgeConfig, TextEncoding};
//!
//! let config = BridgeConfig::from_yaml("bridge.yaml")?;
//! let config = BridgeConfig::default().with_text_encoding(TextEncoding::Utf8);
//! ```

pub mod bridge_config;
pub mod error;

// Re-exports
pub use bridge_config::{BridgeConfig, TextEncoding, MAX_INITIAL_TRANSFER_NODES};
pub use error::{ConfigError, ConfigResult};
