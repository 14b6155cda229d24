//! Upward search for the nearest ancestor of a type

use super::walker::NodeView;
use crate::features::symbols::SymbolSet;

/// Nearest strict ancestor whose symbol is in `types`
pub fn closest<N: NodeView>(node: N, types: &SymbolSet) -> Option<N> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if types.contains(ancestor.symbol()) {
            return Some(ancestor);
        }
        current = ancestor.parent();
    }
    None
}
