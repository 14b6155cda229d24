//! Tree operations

use std::rc::Rc;

use super::context::BridgeContext;
use crate::errors::Result;
use crate::features::codec::{encode, EncodedNode, MarshaledNode};
use crate::features::identity::NodeObject;
use crate::features::languages::BundledLanguage;
use crate::features::tree::SyntaxTree;
use crate::shared::models::{Range, TextEdit};

/// Parse `text` with the grammar registered under `language`
pub fn parse(
    ctx: &BridgeContext,
    language: &str,
    text: &str,
    old_tree: Option<&SyntaxTree>,
) -> Result<SyntaxTree> {
    let language = BundledLanguage::from_name(language)?;
    SyntaxTree::parse(language, text, old_tree, ctx.config())
}

/// Parse with the configured default language
pub fn parse_default(ctx: &BridgeContext, text: &str) -> Result<SyntaxTree> {
    parse(ctx, &ctx.config().default_language, text, None)
}

pub fn root_node(ctx: &mut BridgeContext, tree: &SyntaxTree) -> MarshaledNode {
    encode(&mut ctx.buffer, tree, Some(tree.root()))
}

pub fn edit(tree: &mut SyntaxTree, edit: &TextEdit) -> Result<()> {
    tree.edit(edit)
}

pub fn edited_range(tree: &SyntaxTree) -> Option<Range> {
    tree.edited_range()
}

pub fn changed_ranges(tree: &SyntaxTree, other: &SyntaxTree) -> Vec<Range> {
    tree.changed_ranges(other)
}

#[cfg(unix)]
pub fn print_dot_graph(tree: &SyntaxTree) -> Result<String> {
    tree.print_dot_graph()
}

/// Materialize a wrapper for one handle's words
pub fn cache_node(tree: &SyntaxTree, words: &[u32]) -> Result<Option<Rc<NodeObject>>> {
    tree.cache_node(EncodedNode::from_words(words)?)
}

pub fn cache_nodes(tree: &SyntaxTree, words: &[u32]) -> Result<Vec<Option<Rc<NodeObject>>>> {
    tree.cache_nodes(words)
}
