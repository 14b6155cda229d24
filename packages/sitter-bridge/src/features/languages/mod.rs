//! Bundled grammars

use crate::errors::{BridgeError, Result};

/// Names accepted by [`BundledLanguage::from_name`]
pub const LANGUAGE_NAMES: &[&str] = &["python", "java", "typescript", "tsx", "rust", "go", "kotlin"];

/// Grammars compiled into the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundledLanguage {
    Python,
    Java,
    TypeScript,
    Tsx,
    Rust,
    Go,
    Kotlin,
}

impl BundledLanguage {
    pub fn name(&self) -> &'static str {
        match self {
            BundledLanguage::Python => "python",
            BundledLanguage::Java => "java",
            BundledLanguage::TypeScript => "typescript",
            BundledLanguage::Tsx => "tsx",
            BundledLanguage::Rust => "rust",
            BundledLanguage::Go => "go",
            BundledLanguage::Kotlin => "kotlin",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "python" | "py" => Ok(BundledLanguage::Python),
            "java" => Ok(BundledLanguage::Java),
            "typescript" | "ts" => Ok(BundledLanguage::TypeScript),
            "tsx" => Ok(BundledLanguage::Tsx),
            "rust" | "rs" => Ok(BundledLanguage::Rust),
            "go" => Ok(BundledLanguage::Go),
            "kotlin" | "kt" => Ok(BundledLanguage::Kotlin),
            _ => Err(BridgeError::UnknownLanguage(name.to_string())),
        }
    }

    /// The engine grammar
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            BundledLanguage::Python => tree_sitter_python::language(),
            BundledLanguage::Java => tree_sitter_java::language(),
            BundledLanguage::TypeScript => tree_sitter_typescript::language_typescript(),
            BundledLanguage::Tsx => tree_sitter_typescript::language_tsx(),
            BundledLanguage::Rust => tree_sitter_rust::language(),
            BundledLanguage::Go => tree_sitter_go::language(),
            BundledLanguage::Kotlin => tree_sitter_kotlin::language(),
        }
    }
}

impl std::fmt::Display for BundledLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
