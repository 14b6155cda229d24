//! Syntax trees and their per-tree state

mod syntax_tree;

pub use syntax_tree::{SyntaxTree, TreeId};
