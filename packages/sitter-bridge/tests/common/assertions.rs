//! Result helpers

use sitter_bridge::api::node_methods;
use sitter_bridge::{BridgeContext, EncodedNode, MarshaledNode, Point, SyntaxTree};

pub fn kind(tree: &SyntaxTree, handle: &EncodedNode) -> &'static str {
    node_methods::node_type(Some(tree), handle)
        .expect("tree supplied")
        .unwrap_or("null")
}

pub fn kinds(ctx: &BridgeContext, tree: &SyntaxTree, results: &[MarshaledNode]) -> Vec<&'static str> {
    ctx.unpack(results).iter().map(|h| kind(tree, h)).collect()
}

pub fn span(tree: &SyntaxTree, handle: &EncodedNode) -> (Point, Point) {
    let start = node_methods::start_position(Some(tree), handle).unwrap().unwrap();
    let end = node_methods::end_position(Some(tree), handle).unwrap().unwrap();
    (start, end)
}

/// Handles are in non-decreasing start order and pairwise distinct
pub fn assert_document_order(tree: &SyntaxTree, handles: &[EncodedNode]) {
    for pair in handles.windows(2) {
        assert!(
            span(tree, &pair[0]).0 <= span(tree, &pair[1]).0,
            "results out of order: {:?} then {:?}",
            span(tree, &pair[0]),
            span(tree, &pair[1])
        );
    }
    let mut ids: Vec<_> = handles.iter().map(|h| h.node_id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), handles.len(), "duplicate results");
}
