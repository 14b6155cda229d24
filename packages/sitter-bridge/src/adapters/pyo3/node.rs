//! `Node` and `TreeCursor` classes
//!
//! A `Node` holds the tree's cached wrapper for its handle, so two `Node`
//! objects for the same syntax node compare and hash equal.

use std::rc::Rc;

use pyo3::basic::CompareOp;
use pyo3::prelude::*;

use super::bridge::PyTree;
use crate::api::{node_methods, BridgeContext, TreeWalk};
use crate::errors::{BridgeError, Result};
use crate::features::codec::{EncodedNode, MarshaledNode};
use crate::features::identity::NodeObject;
use crate::features::tree::SyntaxTree;
use crate::shared::models::{HostPoint, Point};

/// Turn handles into `Node` objects, reusing cached wrappers
pub(crate) fn wrap_handles(
    py: Python<'_>,
    tree_obj: &Py<PyTree>,
    tree: &SyntaxTree,
    handles: Vec<EncodedNode>,
) -> Result<Vec<Option<PyNode>>> {
    handles
        .into_iter()
        .map(|handle| {
            Ok(tree.cache_node(handle)?.map(|object| PyNode {
                object,
                tree: tree_obj.clone_ref(py),
            }))
        })
        .collect()
}

fn extract_index(value: &PyAny) -> Result<u32> {
    value
        .extract()
        .map_err(|_| BridgeError::invalid_argument("Second argument must be an integer"))
}

fn extract_types(value: &PyAny) -> Result<Vec<String>> {
    if let Ok(name) = value.extract::<String>() {
        return Ok(vec![name]);
    }
    value
        .extract()
        .map_err(|_| BridgeError::invalid_argument("Argument must be a string or array of strings"))
}

fn host_point(point: (i64, i64)) -> HostPoint {
    HostPoint::new(point.0, point.1)
}

// ═══════════════════════════════════════════════════════════════════════════
// Node
// ═══════════════════════════════════════════════════════════════════════════

#[pyclass(name = "Node", unsendable)]
pub struct PyNode {
    pub(crate) object: Rc<NodeObject>,
    pub(crate) tree: Py<PyTree>,
}

impl PyNode {
    fn handle(&self) -> EncodedNode {
        self.object.encoded()
    }

    fn scalar<T>(
        &self,
        py: Python<'_>,
        read: impl FnOnce(Option<&SyntaxTree>, &EncodedNode) -> Result<Option<T>>,
    ) -> PyResult<Option<T>> {
        let tree = self.tree.try_borrow(py)?;
        Ok(read(Some(&tree.inner), &self.handle())?)
    }

    fn node(
        &self,
        py: Python<'_>,
        step: impl FnOnce(&mut BridgeContext, Option<&SyntaxTree>, &EncodedNode) -> Result<MarshaledNode>,
    ) -> PyResult<Option<PyNode>> {
        let tree = self.tree.try_borrow(py)?;
        let mut bridge = tree.bridge.try_borrow_mut(py)?;
        let result = step(&mut bridge.ctx, Some(&tree.inner), &self.handle())?;
        let handle = bridge.ctx.unpack_one(&result);
        Ok(wrap_handles(py, &self.tree, &tree.inner, vec![handle])?
            .pop()
            .flatten())
    }

    fn nodes(
        &self,
        py: Python<'_>,
        collect: impl FnOnce(
            &mut BridgeContext,
            Option<&SyntaxTree>,
            &EncodedNode,
        ) -> Result<Option<Vec<MarshaledNode>>>,
    ) -> PyResult<Vec<PyNode>> {
        let tree = self.tree.try_borrow(py)?;
        let mut bridge = tree.bridge.try_borrow_mut(py)?;
        let results = collect(&mut bridge.ctx, Some(&tree.inner), &self.handle())?.unwrap_or_default();
        let handles = bridge.ctx.unpack(&results);
        Ok(wrap_handles(py, &self.tree, &tree.inner, handles)?
            .into_iter()
            .flatten()
            .collect())
    }
}

#[pymethods]
impl PyNode {
    /// The six handle words
    #[getter]
    fn handle_words(&self) -> Vec<u32> {
        self.handle().words().to_vec()
    }

    #[getter]
    fn tree(&self, py: Python<'_>) -> Py<PyTree> {
        self.tree.clone_ref(py)
    }

    #[getter]
    fn start_index(&self, py: Python<'_>) -> PyResult<Option<u32>> {
        self.scalar(py, node_methods::start_index)
    }

    #[getter]
    fn end_index(&self, py: Python<'_>) -> PyResult<Option<u32>> {
        self.scalar(py, node_methods::end_index)
    }

    #[getter]
    fn start_position(&self, py: Python<'_>) -> PyResult<Option<Point>> {
        self.scalar(py, node_methods::start_position)
    }

    #[getter]
    fn end_position(&self, py: Python<'_>) -> PyResult<Option<Point>> {
        self.scalar(py, node_methods::end_position)
    }

    #[getter]
    fn r#type(&self, py: Python<'_>) -> PyResult<Option<&'static str>> {
        self.scalar(py, node_methods::node_type)
    }

    #[getter]
    fn type_id(&self, py: Python<'_>) -> PyResult<Option<u16>> {
        self.scalar(py, node_methods::type_id)
    }

    #[getter]
    fn is_named(&self, py: Python<'_>) -> PyResult<Option<bool>> {
        self.scalar(py, node_methods::is_named)
    }

    #[getter]
    fn is_missing(&self, py: Python<'_>) -> PyResult<Option<bool>> {
        self.scalar(py, node_methods::is_missing)
    }

    #[getter]
    fn has_changes(&self, py: Python<'_>) -> PyResult<Option<bool>> {
        self.scalar(py, node_methods::has_changes)
    }

    #[getter]
    fn has_error(&self, py: Python<'_>) -> PyResult<Option<bool>> {
        self.scalar(py, node_methods::has_error)
    }

    #[getter]
    fn child_count(&self, py: Python<'_>) -> PyResult<Option<u32>> {
        self.scalar(py, node_methods::child_count)
    }

    #[getter]
    fn named_child_count(&self, py: Python<'_>) -> PyResult<Option<u32>> {
        self.scalar(py, node_methods::named_child_count)
    }

    fn to_sexp(&self, py: Python<'_>) -> PyResult<Option<String>> {
        self.scalar(py, node_methods::to_sexp)
    }

    #[getter]
    fn parent(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::parent)
    }

    fn child(&self, py: Python<'_>, index: &PyAny) -> PyResult<Option<PyNode>> {
        let index = extract_index(index)?;
        self.node(py, |ctx, tree, handle| node_methods::child(ctx, tree, handle, index))
    }

    fn named_child(&self, py: Python<'_>, index: &PyAny) -> PyResult<Option<PyNode>> {
        let index = extract_index(index)?;
        self.node(py, |ctx, tree, handle| {
            node_methods::named_child(ctx, tree, handle, index)
        })
    }

    #[getter]
    fn first_child(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::first_child)
    }

    #[getter]
    fn first_named_child(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::first_named_child)
    }

    #[getter]
    fn last_child(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::last_child)
    }

    #[getter]
    fn last_named_child(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::last_named_child)
    }

    #[getter]
    fn next_sibling(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::next_sibling)
    }

    #[getter]
    fn next_named_sibling(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::next_named_sibling)
    }

    #[getter]
    fn previous_sibling(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::previous_sibling)
    }

    #[getter]
    fn previous_named_sibling(&self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        self.node(py, node_methods::previous_named_sibling)
    }

    fn first_child_for_index(&self, py: Python<'_>, index: i64) -> PyResult<Option<PyNode>> {
        self.node(py, |ctx, tree, handle| {
            node_methods::first_child_for_index(ctx, tree, handle, index)
        })
    }

    fn first_named_child_for_index(&self, py: Python<'_>, index: i64) -> PyResult<Option<PyNode>> {
        self.node(py, |ctx, tree, handle| {
            node_methods::first_named_child_for_index(ctx, tree, handle, index)
        })
    }

    #[pyo3(signature = (start, end = None))]
    fn descendant_for_index(&self, py: Python<'_>, start: i64, end: Option<i64>) -> PyResult<Option<PyNode>> {
        let end = end.unwrap_or(start);
        self.node(py, |ctx, tree, handle| {
            node_methods::descendant_for_index(ctx, tree, handle, start, end)
        })
    }

    #[pyo3(signature = (start, end = None))]
    fn named_descendant_for_index(
        &self,
        py: Python<'_>,
        start: i64,
        end: Option<i64>,
    ) -> PyResult<Option<PyNode>> {
        let end = end.unwrap_or(start);
        self.node(py, |ctx, tree, handle| {
            node_methods::named_descendant_for_index(ctx, tree, handle, start, end)
        })
    }

    #[pyo3(signature = (start, end = None))]
    fn descendant_for_position(
        &self,
        py: Python<'_>,
        start: (i64, i64),
        end: Option<(i64, i64)>,
    ) -> PyResult<Option<PyNode>> {
        let (start, end) = (host_point(start), host_point(end.unwrap_or(start)));
        self.node(py, |ctx, tree, handle| {
            node_methods::descendant_for_position(ctx, tree, handle, start, end)
        })
    }

    #[pyo3(signature = (start, end = None))]
    fn named_descendant_for_position(
        &self,
        py: Python<'_>,
        start: (i64, i64),
        end: Option<(i64, i64)>,
    ) -> PyResult<Option<PyNode>> {
        let (start, end) = (host_point(start), host_point(end.unwrap_or(start)));
        self.node(py, |ctx, tree, handle| {
            node_methods::named_descendant_for_position(ctx, tree, handle, start, end)
        })
    }

    fn child_for_field_id(&self, py: Python<'_>, field_id: &PyAny) -> PyResult<Option<PyNode>> {
        let field_id = extract_index(field_id)?;
        self.node(py, |ctx, tree, handle| {
            node_methods::child_node_for_field_id(ctx, tree, handle, field_id)
        })
    }

    fn closest(&self, py: Python<'_>, types: &PyAny) -> PyResult<Option<PyNode>> {
        let types = extract_types(types)?;
        self.node(py, |ctx, tree, handle| {
            node_methods::closest(ctx, tree, handle, types.as_slice())
        })
    }

    #[getter]
    fn children(&self, py: Python<'_>) -> PyResult<Vec<PyNode>> {
        self.nodes(py, node_methods::children)
    }

    #[getter]
    fn named_children(&self, py: Python<'_>) -> PyResult<Vec<PyNode>> {
        self.nodes(py, node_methods::named_children)
    }

    fn children_for_field_id(&self, py: Python<'_>, field_id: &PyAny) -> PyResult<Vec<PyNode>> {
        let field_id = extract_index(field_id)?;
        self.nodes(py, |ctx, tree, handle| {
            node_methods::child_nodes_for_field_id(ctx, tree, handle, field_id)
        })
    }

    #[pyo3(signature = (types, start_position = None, end_position = None))]
    fn descendants_of_type(
        &self,
        py: Python<'_>,
        types: &PyAny,
        start_position: Option<(i64, i64)>,
        end_position: Option<(i64, i64)>,
    ) -> PyResult<Vec<PyNode>> {
        let types = extract_types(types)?;
        let start = start_position.map(host_point);
        let end = end_position.map(host_point);
        self.nodes(py, |ctx, tree, handle| {
            node_methods::descendants_of_type(ctx, tree, handle, types.as_slice(), start, end)
        })
    }

    fn walk(&self, py: Python<'_>) -> PyResult<Option<PyTreeCursor>> {
        let walk = self.scalar(py, node_methods::walk)?;
        Ok(walk.map(|walk| PyTreeCursor {
            walk,
            tree: self.tree.clone_ref(py),
        }))
    }

    fn __richcmp__(&self, other: &Self, op: CompareOp, py: Python<'_>) -> PyObject {
        match op {
            CompareOp::Eq => Rc::ptr_eq(&self.object, &other.object).into_py(py),
            CompareOp::Ne => (!Rc::ptr_eq(&self.object, &other.object)).into_py(py),
            _ => py.NotImplemented(),
        }
    }

    fn __hash__(&self) -> u64 {
        Rc::as_ptr(&self.object) as usize as u64
    }

    fn __repr__(&self, py: Python<'_>) -> PyResult<String> {
        let kind = self.scalar(py, node_methods::node_type)?.unwrap_or("null");
        let start = self.scalar(py, node_methods::start_position)?.unwrap_or_default();
        let end = self.scalar(py, node_methods::end_position)?.unwrap_or_default();
        Ok(format!("<Node type={kind}, start_point={start}, end_point={end}>"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TreeCursor
// ═══════════════════════════════════════════════════════════════════════════

#[pyclass(name = "TreeCursor", unsendable)]
pub struct PyTreeCursor {
    walk: TreeWalk,
    tree: Py<PyTree>,
}

#[pymethods]
impl PyTreeCursor {
    fn goto_first_child(&mut self, py: Python<'_>) -> PyResult<bool> {
        let tree = self.tree.try_borrow(py)?;
        Ok(self.walk.goto_first_child(&tree.inner)?)
    }

    fn goto_next_sibling(&mut self, py: Python<'_>) -> PyResult<bool> {
        let tree = self.tree.try_borrow(py)?;
        Ok(self.walk.goto_next_sibling(&tree.inner)?)
    }

    fn goto_parent(&mut self, py: Python<'_>) -> PyResult<bool> {
        let tree = self.tree.try_borrow(py)?;
        Ok(self.walk.goto_parent(&tree.inner)?)
    }

    #[getter]
    fn current_field_id(&mut self, py: Python<'_>) -> PyResult<u16> {
        let tree = self.tree.try_borrow(py)?;
        Ok(self.walk.current_field_id(&tree.inner)?)
    }

    #[getter]
    fn current_node(&mut self, py: Python<'_>) -> PyResult<Option<PyNode>> {
        let tree = self.tree.try_borrow(py)?;
        let mut bridge = tree.bridge.try_borrow_mut(py)?;
        let result = self.walk.current_node(&mut bridge.ctx, &tree.inner)?;
        let handle = bridge.ctx.unpack_one(&result);
        Ok(wrap_handles(py, &self.tree, &tree.inner, vec![handle])?
            .pop()
            .flatten())
    }

    /// Re-position on `node`, possibly in another tree
    fn reset(&mut self, py: Python<'_>, node: PyRef<'_, PyNode>) -> PyResult<()> {
        {
            let tree = node.tree.try_borrow(py)?;
            self.walk.reset(&tree.inner, &node.handle())?;
        }
        self.tree = node.tree.clone_ref(py);
        Ok(())
    }
}
