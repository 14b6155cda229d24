//! Bridge configuration
//!
//! YAML schema v1:
//!
//! ```yaml
//! version: 1
//! text_encoding: utf16        # utf16 | utf8
//! initial_transfer_nodes: 1   # slots allocated up front
//! default_language: python
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Upper bound on the up-front transfer buffer size, in nodes
pub const MAX_INITIAL_TRANSFER_NODES: u32 = 65536;

/// How the host represents source text.
///
/// Offsets and point columns crossing the boundary are expressed in units
/// of this encoding; the engine works in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// 16-bit code units (2 bytes per unit)
    Utf16,
    /// Plain bytes
    Utf8,
}

impl TextEncoding {
    /// Bytes per host unit
    pub fn bytes_per_unit(self) -> u32 {
        match self {
            Self::Utf16 => 2,
            Self::Utf8 => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf16 => "utf16",
            Self::Utf8 => "utf8",
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::Utf16
    }
}

impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "utf16" | "utf-16" => Ok(Self::Utf16),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            _ => Err(ConfigError::UnknownEncoding(s.to_string())),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw YAML document; `version` is optional here so a missing field gets a
/// dedicated error instead of a serde message.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BridgeConfigFile {
    version: Option<u32>,
    #[serde(default)]
    text_encoding: TextEncoding,
    #[serde(default = "default_initial_transfer_nodes")]
    initial_transfer_nodes: u32,
    #[serde(default = "default_language")]
    default_language: String,
}

fn default_initial_transfer_nodes() -> u32 {
    1
}

fn default_language() -> String {
    "python".to_string()
}

/// Validated bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeConfig {
    pub version: u32,
    pub text_encoding: TextEncoding,
    pub initial_transfer_nodes: u32,
    pub default_language: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            text_encoding: TextEncoding::default(),
            initial_transfer_nodes: default_initial_transfer_nodes(),
            default_language: default_language(),
        }
    }
}

impl BridgeConfig {
    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: BridgeConfigFile = serde_yaml::from_str(content)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            version,
            text_encoding: file.text_encoding,
            initial_transfer_nodes: file.initial_transfer_nodes,
            default_language: file.default_language,
        };
        config.validate()?;
        Ok(config)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.text_encoding = encoding;
        self
    }

    pub fn with_initial_transfer_nodes(mut self, nodes: u32) -> Self {
        self.initial_transfer_nodes = nodes;
        self
    }

    /// Range checks
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_INITIAL_TRANSFER_NODES).contains(&self.initial_transfer_nodes) {
            return Err(ConfigError::range_with_hint(
                "initial_transfer_nodes",
                self.initial_transfer_nodes,
                1,
                MAX_INITIAL_TRANSFER_NODES,
                "The transfer buffer must hold at least one node; it grows on demand past this size",
            ));
        }
        Ok(())
    }

    /// Bytes per host offset unit
    pub fn bytes_per_unit(&self) -> u32 {
        self.text_encoding.bytes_per_unit()
    }
}
