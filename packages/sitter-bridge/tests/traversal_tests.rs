//! Cursor-driven walks over parsed Python

mod common;

use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sitter_bridge::api::node_methods;
use sitter_bridge::{EncodedNode, HostPoint, Point};

#[test]
fn test_children_match_engine_child_count() {
    let (mut ctx, tree) = setup(&fixture_class_with_calls(3));
    for node in all_nodes(&tree) {
        let handle = EncodedNode::from_node(node);
        let children = node_methods::children(&mut ctx, Some(&tree), &handle).unwrap().unwrap();
        assert_eq!(children.len(), node.child_count());
        assert_eq!(
            node_methods::child_count(Some(&tree), &handle).unwrap(),
            Some(node.child_count() as u32)
        );
    }
}

#[test]
fn test_named_children_are_named_subsequence() {
    let (mut ctx, tree) = setup(&fixture_class_with_calls(2));
    for node in all_nodes(&tree) {
        let handle = EncodedNode::from_node(node);
        let all = node_methods::children(&mut ctx, Some(&tree), &handle).unwrap().unwrap();
        let all = ctx.unpack(&all);
        let named = node_methods::named_children(&mut ctx, Some(&tree), &handle).unwrap().unwrap();
        let named = ctx.unpack(&named);

        let expected: Vec<_> = all
            .into_iter()
            .filter(|h| node_methods::is_named(Some(&tree), h).unwrap() == Some(true))
            .collect();
        assert_eq!(named, expected);
    }
}

#[test]
fn test_descendants_inside_function() {
    let (mut ctx, tree) = setup(fixture_function_with_literal());
    let function = tree.root().child(0).unwrap();
    assert_eq!(function.start_position().row, 0);
    assert_eq!(function.end_position().row, 5);
    let handle = EncodedNode::from_node(function);

    let found = node_methods::descendants_of_type(&mut ctx, Some(&tree), &handle, &["integer"], None, None)
        .unwrap()
        .unwrap();
    let found = ctx.unpack(&found);
    assert_eq!(found.len(), 1);
    assert_eq!(span(&tree, &found[0]).0, Point::new(2, 4));

    let windowed = node_methods::descendants_of_type(
        &mut ctx,
        Some(&tree),
        &handle,
        &["integer"],
        Some(HostPoint::new(3, 0)),
        Some(HostPoint::new(4, 0)),
    )
    .unwrap()
    .unwrap();
    assert!(windowed.is_empty());
}

#[test]
fn test_descendants_in_document_order() {
    let (mut ctx, tree) = setup(&fixture_class_with_calls(5));
    let root = EncodedNode::from_node(tree.root());
    let found = node_methods::descendants_of_type(
        &mut ctx,
        Some(&tree),
        &root,
        &["identifier", "integer", "call"],
        None,
        None,
    )
    .unwrap()
    .unwrap();
    let handles = ctx.unpack(&found);
    assert!(!handles.is_empty());
    assert_document_order(&tree, &handles);
}

#[test]
fn test_explicit_unbounded_window_equals_default() {
    let (mut ctx, tree) = setup(&fixture_class_with_calls(3));
    let root = EncodedNode::from_node(tree.root());
    let types = ["identifier"];

    let default = node_methods::descendants_of_type(&mut ctx, Some(&tree), &root, &types, None, None)
        .unwrap()
        .unwrap();
    let default = ctx.unpack(&default);
    let explicit = node_methods::descendants_of_type(
        &mut ctx,
        Some(&tree),
        &root,
        &types,
        Some(HostPoint::new(0, 0)),
        Some(HostPoint::from(Point::MAX)),
    )
    .unwrap()
    .unwrap();
    assert_eq!(ctx.unpack(&explicit), default);
}

#[test]
fn test_error_sentinel_matches_error_nodes() {
    let (mut ctx, tree) = setup("print(1))\n");
    assert!(tree.root().has_error());
    let root = EncodedNode::from_node(tree.root());
    let errors = node_methods::descendants_of_type(&mut ctx, Some(&tree), &root, &["ERROR"], None, None)
        .unwrap()
        .unwrap();
    assert!(!errors.is_empty());
    assert!(kinds(&ctx, &tree, &errors).iter().all(|k| *k == "ERROR"));
}

#[test]
fn test_closest_finds_enclosing_definitions() {
    let (mut ctx, tree) = setup(&fixture_class_with_calls(2));
    let root = EncodedNode::from_node(tree.root());
    let calls = node_methods::descendants_of_type(&mut ctx, Some(&tree), &root, &["call"], None, None)
        .unwrap()
        .unwrap();
    let calls = ctx.unpack(&calls);
    assert_eq!(calls.len(), 2);

    for call in &calls {
        let function = node_methods::closest(&mut ctx, Some(&tree), call, &["function_definition"]).unwrap();
        assert_eq!(kind(&tree, &ctx.unpack_one(&function)), "function_definition");

        let class = node_methods::closest(&mut ctx, Some(&tree), call, &["class_definition"]).unwrap();
        assert_eq!(kind(&tree, &ctx.unpack_one(&class)), "class_definition");
    }

    let none = node_methods::closest(&mut ctx, Some(&tree), &root, &["module", "class_definition"]).unwrap();
    assert!(none.is_null());
}

fn arb_source() -> impl Strategy<Value = String> {
    let statement = prop_oneof![
        Just("x = 1"),
        Just("y = x + 2"),
        Just("print(x, y)"),
        Just("if x:\n        z = [1, 2]"),
        Just("return x"),
    ];
    prop::collection::vec(prop::collection::vec(statement, 1..4), 1..6).prop_map(|functions| {
        functions
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let body: String = body.iter().map(|s| format!("    {s}\n")).collect();
                format!("def f{i}(x):\n{body}")
            })
            .collect()
    })
}

fn intersects(start: Point, end: Point, window: (Point, Point)) -> bool {
    end > window.0 && start < window.1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_window_is_filtered_unbounded_query(source in arb_source(), a in 0u32..20, b in 0u32..20, col in 0u32..8) {
        let (mut ctx, tree) = setup(&source);
        let root = EncodedNode::from_node(tree.root());
        let types = ["identifier", "integer"];
        let window = (Point::new(a.min(b), col), Point::new(a.max(b), col + 1));

        let unbounded = node_methods::descendants_of_type(&mut ctx, Some(&tree), &root, &types, None, None)
            .unwrap()
            .unwrap();
        let expected: Vec<_> = ctx
            .unpack(&unbounded)
            .into_iter()
            .filter(|h| {
                let (start, end) = span(&tree, h);
                intersects(start, end, window)
            })
            .collect();

        let bounded = node_methods::descendants_of_type(
            &mut ctx,
            Some(&tree),
            &root,
            &types,
            Some(window.0.into()),
            Some(window.1.into()),
        )
        .unwrap()
        .unwrap();
        prop_assert_eq!(ctx.unpack(&bounded), expected);
    }

    #[test]
    fn prop_descendants_ordered_and_unique(source in arb_source()) {
        let (mut ctx, tree) = setup(&source);
        let root = EncodedNode::from_node(tree.root());
        let found = node_methods::descendants_of_type(
            &mut ctx,
            Some(&tree),
            &root,
            &["identifier", "call", "assignment"],
            None,
            None,
        )
        .unwrap()
        .unwrap();
        assert_document_order(&tree, &ctx.unpack(&found));
    }
}
