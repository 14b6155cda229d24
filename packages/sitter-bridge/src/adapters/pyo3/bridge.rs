//! `Bridge` and `Tree` classes

use pyo3::prelude::*;

use super::node::{wrap_handles, PyNode};
use crate::api::{tree_methods, BridgeContext};
use crate::config::{BridgeConfig, TextEncoding};
use crate::errors::BridgeError;
use crate::features::tree::SyntaxTree;
use crate::shared::models::{HostPoint, Range, TextEdit};

// ═══════════════════════════════════════════════════════════════════════════
// Bridge - processing context
// ═══════════════════════════════════════════════════════════════════════════

/// Shared scratch state for every tree parsed through it
#[pyclass(name = "Bridge", unsendable)]
pub struct PyBridge {
    pub(crate) ctx: BridgeContext,
}

#[pymethods]
impl PyBridge {
    #[new]
    #[pyo3(signature = (text_encoding = "utf16", initial_transfer_nodes = 1, default_language = "python"))]
    fn new(text_encoding: &str, initial_transfer_nodes: u32, default_language: &str) -> PyResult<Self> {
        let encoding: TextEncoding = text_encoding.parse().map_err(BridgeError::from)?;
        let mut config = BridgeConfig::default()
            .with_text_encoding(encoding)
            .with_initial_transfer_nodes(initial_transfer_nodes);
        config.default_language = default_language.to_string();
        Ok(Self {
            ctx: BridgeContext::new(config)?,
        })
    }

    /// Build from a YAML configuration file
    #[staticmethod]
    fn from_yaml(path: &str) -> PyResult<Self> {
        let config = BridgeConfig::from_yaml(path).map_err(BridgeError::from)?;
        Ok(Self {
            ctx: BridgeContext::new(config)?,
        })
    }

    /// Parse `text`; `language` defaults to the configured one
    #[pyo3(signature = (text, language = None, old_tree = None))]
    fn parse(
        slf: &PyCell<Self>,
        text: &str,
        language: Option<&str>,
        old_tree: Option<PyRef<'_, PyTree>>,
    ) -> PyResult<PyTree> {
        let bridge = slf.try_borrow()?;
        let language = language.unwrap_or(bridge.ctx.config().default_language.as_str());
        let old = old_tree.as_ref().map(|t| &t.inner);
        let inner = tree_methods::parse(&bridge.ctx, language, text, old)?;
        Ok(PyTree {
            inner,
            bridge: slf.into(),
        })
    }

    /// Copy of the transfer buffer words of the last result
    fn node_transfer_array(&self) -> Vec<u32> {
        self.ctx.transfer_words().to_vec()
    }

    #[getter]
    fn text_encoding(&self) -> &'static str {
        self.ctx.config().text_encoding.as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "Bridge(text_encoding={}, transfer_nodes={})",
            self.ctx.config().text_encoding,
            self.ctx.buffer().node_capacity()
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tree
// ═══════════════════════════════════════════════════════════════════════════

#[pyclass(name = "Tree", unsendable)]
pub struct PyTree {
    pub(crate) inner: SyntaxTree,
    pub(crate) bridge: Py<PyBridge>,
}

#[pymethods]
impl PyTree {
    #[getter]
    fn root_node(slf: &PyCell<Self>, py: Python<'_>) -> PyResult<Option<PyNode>> {
        let tree = slf.try_borrow()?;
        let mut bridge = tree.bridge.try_borrow_mut(py)?;
        let result = tree_methods::root_node(&mut bridge.ctx, &tree.inner);
        let handle = bridge.ctx.unpack_one(&result);
        let tree_obj: Py<PyTree> = slf.into();
        Ok(wrap_handles(py, &tree_obj, &tree.inner, vec![handle])?
            .pop()
            .flatten())
    }

    #[getter]
    fn language(&self) -> &'static str {
        self.inner.language().name()
    }

    /// Apply an edit given in host units; positions are `(row, column)`
    #[allow(clippy::too_many_arguments)]
    fn edit(
        &mut self,
        start_index: i64,
        old_end_index: i64,
        new_end_index: i64,
        start_position: (i64, i64),
        old_end_position: (i64, i64),
        new_end_position: (i64, i64),
    ) -> PyResult<()> {
        let edit = TextEdit {
            start_index,
            old_end_index,
            new_end_index,
            start_position: HostPoint::new(start_position.0, start_position.1),
            old_end_position: HostPoint::new(old_end_position.0, old_end_position.1),
            new_end_position: HostPoint::new(new_end_position.0, new_end_position.1),
        };
        tree_methods::edit(&mut self.inner, &edit)?;
        Ok(())
    }

    fn get_edited_range(&self) -> Option<Range> {
        tree_methods::edited_range(&self.inner)
    }

    fn get_changed_ranges(&self, other: PyRef<'_, PyTree>) -> Vec<Range> {
        tree_methods::changed_ranges(&self.inner, &other.inner)
    }

    #[cfg(unix)]
    fn print_dot_graph(&self) -> PyResult<String> {
        Ok(tree_methods::print_dot_graph(&self.inner)?)
    }

    /// Wrapper for a six-word handle taken from the transfer array
    fn cache_node(slf: &PyCell<Self>, words: &PyAny) -> PyResult<Option<PyNode>> {
        let words: Vec<u32> = words
            .extract()
            .map_err(|_| BridgeError::invalid_argument("Node handle must be a sequence of integers"))?;
        let tree = slf.try_borrow()?;
        let tree_obj: Py<PyTree> = slf.into();
        Ok(tree_methods::cache_node(&tree.inner, &words)?.map(|object| PyNode {
            object,
            tree: tree_obj,
        }))
    }

    /// Wrappers for consecutive six-word handles (`None` for null handles)
    fn cache_nodes(slf: &PyCell<Self>, py: Python<'_>, words: &PyAny) -> PyResult<Vec<Option<PyNode>>> {
        let words: Vec<u32> = words
            .extract()
            .map_err(|_| BridgeError::invalid_argument("Node handles must be a sequence of integers"))?;
        let tree = slf.try_borrow()?;
        let tree_obj: Py<PyTree> = slf.into();
        Ok(tree_methods::cache_nodes(&tree.inner, &words)?
            .into_iter()
            .map(|object| {
                object.map(|object| PyNode {
                    object,
                    tree: tree_obj.clone_ref(py),
                })
            })
            .collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "Tree(language={}, generation={})",
            self.inner.language(),
            self.inner.generation()
        )
    }
}
