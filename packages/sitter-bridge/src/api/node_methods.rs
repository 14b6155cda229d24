//! Node accessors
//!
//! Every accessor takes a handle as the host holds it plus the tree it
//! belongs to. For a null handle, scalar and array accessors give `None`
//! and node accessors give the null encoding. Handles that name no node of
//! the tree are rejected. Negative offsets and points give a null (or
//! empty) result, not an error; oversized ones clamp to the end of the
//! engine's range.

use tree_sitter::Node;

use super::context::BridgeContext;
use super::walk::TreeWalk;
use crate::errors::{BridgeError, Result};
use crate::features::codec::{decode, encode, encode_batch, encode_null, EncodedNode, MarshaledNode};
use crate::features::symbols::SymbolSet;
use crate::features::traversal::{self, PointWindow, ScratchCursor};
use crate::features::tree::SyntaxTree;
use crate::shared::models::{HostPoint, Point};
use crate::shared::units::Units;

// ═══════════════════════════════════════════════════════════════════════════
// Plumbing
// ═══════════════════════════════════════════════════════════════════════════

fn bind<'t>(
    tree: Option<&'t SyntaxTree>,
    handle: &EncodedNode,
) -> Result<Option<(&'t SyntaxTree, Node<'t>)>> {
    let node = decode(handle, tree)?;
    Ok(tree.zip(node))
}

/// Range failures become "no value"; everything else propagates
fn soft<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_soft() => {
            tracing::trace!(error = %err, "unresolved range argument");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn scalar<'t, T>(
    tree: Option<&'t SyntaxTree>,
    handle: &EncodedNode,
    read: impl FnOnce(&'t SyntaxTree, Node<'t>) -> T,
) -> Result<Option<T>> {
    Ok(bind(tree, handle)?.map(|(tree, node)| read(tree, node)))
}

fn single<'t>(
    ctx: &mut BridgeContext,
    tree: Option<&'t SyntaxTree>,
    handle: &EncodedNode,
    step: impl FnOnce(&'t SyntaxTree, Node<'t>) -> Result<Option<Node<'t>>>,
) -> Result<MarshaledNode> {
    match bind(tree, handle)? {
        Some((tree, node)) => {
            let result = step(tree, node)?;
            Ok(encode(&mut ctx.buffer, tree, result))
        }
        None => Ok(encode_null(&mut ctx.buffer)),
    }
}

fn many<'t>(
    ctx: &mut BridgeContext,
    tree: Option<&'t SyntaxTree>,
    handle: &EncodedNode,
    collect: impl FnOnce(&mut ScratchCursor, &'t SyntaxTree, Node<'t>) -> Result<Vec<Node<'t>>>,
) -> Result<Option<Vec<MarshaledNode>>> {
    let Some((tree, node)) = bind(tree, handle)? else {
        return Ok(None);
    };
    let nodes = collect(&mut ctx.cursor, tree, node)?;
    Ok(Some(encode_batch(&mut ctx.buffer, tree, &nodes)))
}

fn field_id(raw: u32) -> Result<u16> {
    u16::try_from(raw).map_err(|_| BridgeError::invalid_argument(format!("Invalid field id {raw}")))
}

fn window(units: Units, start: Option<HostPoint>, end: Option<HostPoint>) -> Result<PointWindow> {
    let mut window = PointWindow::unbounded();
    if let Some(start) = start {
        window.start = units.point_from_host(start)?;
    }
    if let Some(end) = end {
        window.end = units.point_from_host(end)?;
    }
    Ok(window)
}

// ═══════════════════════════════════════════════════════════════════════════
// Scalars
// ═══════════════════════════════════════════════════════════════════════════

pub fn start_index(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<u32>> {
    scalar(tree, handle, |tree, node| tree.units().offset_to_host(node.start_byte()))
}

pub fn end_index(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<u32>> {
    scalar(tree, handle, |tree, node| tree.units().offset_to_host(node.end_byte()))
}

pub fn start_position(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<Point>> {
    scalar(tree, handle, |tree, node| tree.units().point_to_host(node.start_position()))
}

pub fn end_position(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<Point>> {
    scalar(tree, handle, |tree, node| tree.units().point_to_host(node.end_position()))
}

/// Display name of the node's type
pub fn node_type(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<&'static str>> {
    scalar(tree, handle, |_, node| node.kind())
}

/// Grammar symbol id
pub fn type_id(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<u16>> {
    scalar(tree, handle, |_, node| node.kind_id())
}

pub fn is_named(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<bool>> {
    scalar(tree, handle, |_, node| node.is_named())
}

pub fn is_missing(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<bool>> {
    scalar(tree, handle, |_, node| node.is_missing())
}

pub fn has_changes(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<bool>> {
    scalar(tree, handle, |_, node| node.has_changes())
}

pub fn has_error(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<bool>> {
    scalar(tree, handle, |_, node| node.has_error())
}

/// S-expression rendering of the subtree
pub fn to_sexp(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<String>> {
    scalar(tree, handle, |_, node| node.to_sexp())
}

pub fn child_count(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<u32>> {
    scalar(tree, handle, |_, node| node.child_count() as u32)
}

pub fn named_child_count(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<u32>> {
    scalar(tree, handle, |_, node| node.named_child_count() as u32)
}

// ═══════════════════════════════════════════════════════════════════════════
// Single nodes
// ═══════════════════════════════════════════════════════════════════════════

pub fn parent(ctx: &mut BridgeContext, tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.parent()))
}

pub fn child(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    index: u32,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.child(index as usize)))
}

pub fn named_child(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    index: u32,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.named_child(index as usize)))
}

pub fn first_child(ctx: &mut BridgeContext, tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.child(0)))
}

pub fn first_named_child(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.named_child(0)))
}

pub fn last_child(ctx: &mut BridgeContext, tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| {
        Ok(node.child_count().checked_sub(1).and_then(|i| node.child(i)))
    })
}

pub fn last_named_child(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| {
        Ok(node
            .named_child_count()
            .checked_sub(1)
            .and_then(|i| node.named_child(i)))
    })
}

pub fn next_sibling(ctx: &mut BridgeContext, tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.next_sibling()))
}

pub fn next_named_sibling(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.next_named_sibling()))
}

pub fn previous_sibling(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.prev_sibling()))
}

pub fn previous_named_sibling(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |_, node| Ok(node.prev_named_sibling()))
}

/// First child that extends past host offset `index`
pub fn first_child_for_index(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    index: i64,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let byte = soft(tree.units().offset_from_host(index))?;
        Ok(byte.and_then(|byte| node.first_child_for_byte(byte)))
    })
}

pub fn first_named_child_for_index(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    index: i64,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let byte = soft(tree.units().offset_from_host(index))?;
        Ok(byte.and_then(|byte| node.first_named_child_for_byte(byte)))
    })
}

fn byte_range(units: Units, start: i64, end: i64) -> Result<(usize, usize)> {
    Ok((units.offset_from_host(start)?, units.offset_from_host(end)?))
}

fn point_range(
    units: Units,
    start: HostPoint,
    end: HostPoint,
) -> Result<(tree_sitter::Point, tree_sitter::Point)> {
    Ok((units.point_from_host(start)?, units.point_from_host(end)?))
}

/// Smallest node spanning host offsets `start..end`
pub fn descendant_for_index(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    start: i64,
    end: i64,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let range = soft(byte_range(tree.units(), start, end))?;
        Ok(range.and_then(|(a, b)| node.descendant_for_byte_range(a, b)))
    })
}

pub fn named_descendant_for_index(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    start: i64,
    end: i64,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let range = soft(byte_range(tree.units(), start, end))?;
        Ok(range.and_then(|(a, b)| node.named_descendant_for_byte_range(a, b)))
    })
}

/// Smallest node spanning host points `start..end`
pub fn descendant_for_position(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    start: HostPoint,
    end: HostPoint,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let range = soft(point_range(tree.units(), start, end))?;
        Ok(range.and_then(|(a, b)| node.descendant_for_point_range(a, b)))
    })
}

pub fn named_descendant_for_position(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    start: HostPoint,
    end: HostPoint,
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let range = soft(point_range(tree.units(), start, end))?;
        Ok(range.and_then(|(a, b)| node.named_descendant_for_point_range(a, b)))
    })
}

pub fn child_node_for_field_id(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    field: u32,
) -> Result<MarshaledNode> {
    let field = field_id(field)?;
    single(ctx, tree, handle, |_, node| Ok(node.child_by_field_id(field)))
}

/// Nearest strict ancestor whose type is one of `types`
pub fn closest<S: AsRef<str>>(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    types: &[S],
) -> Result<MarshaledNode> {
    single(ctx, tree, handle, |tree, node| {
        let types = SymbolSet::from_names(types, &tree.grammar());
        Ok(traversal::closest(node, &types))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Node arrays
// ═══════════════════════════════════════════════════════════════════════════

pub fn children(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<Option<Vec<MarshaledNode>>> {
    many(ctx, tree, handle, |cursor, _, node| {
        Ok(traversal::children(&mut cursor.reset(node)))
    })
}

pub fn named_children(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
) -> Result<Option<Vec<MarshaledNode>>> {
    many(ctx, tree, handle, |cursor, _, node| {
        Ok(traversal::named_children(&mut cursor.reset(node)))
    })
}

/// Children attached under `field` (0 selects children with no field)
pub fn child_nodes_for_field_id(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    field: u32,
) -> Result<Option<Vec<MarshaledNode>>> {
    let field = field_id(field)?;
    many(ctx, tree, handle, |cursor, _, node| {
        Ok(traversal::children_for_field_id(&mut cursor.reset(node), field))
    })
}

/// Nodes of the given types under `handle` (itself included) that overlap
/// the window `[start, end)`, in document order. Omitted bounds are open.
pub fn descendants_of_type<S: AsRef<str>>(
    ctx: &mut BridgeContext,
    tree: Option<&SyntaxTree>,
    handle: &EncodedNode,
    types: &[S],
    start: Option<HostPoint>,
    end: Option<HostPoint>,
) -> Result<Option<Vec<MarshaledNode>>> {
    many(ctx, tree, handle, |cursor, tree, node| {
        let Some(window) = soft(window(tree.units(), start, end))? else {
            return Ok(Vec::new());
        };
        let types = SymbolSet::from_names(types, &tree.grammar());
        Ok(traversal::descendants_of_type(&mut cursor.reset(node), &types, window))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Cursors
// ═══════════════════════════════════════════════════════════════════════════

/// An owned cursor positioned at the node
pub fn walk(tree: Option<&SyntaxTree>, handle: &EncodedNode) -> Result<Option<TreeWalk>> {
    scalar(tree, handle, TreeWalk::new)
}
