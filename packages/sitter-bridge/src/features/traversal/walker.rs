//! Cursor and node capabilities the traversals are written against
//!
//! [`ScratchCursor`] owns one raw engine cursor that is reset onto
//! whatever node the next traversal starts from, across trees. A reset
//! hands out a [`BoundCursor`] that borrows both the scratch cursor and the
//! tree, so two traversals can never share it at once.

use std::marker::PhantomData;

use tree_sitter::{ffi, Node, Point, Tree};

/// Row-major `a <= b`
#[inline]
pub fn point_lte(a: Point, b: Point) -> bool {
    a.row < b.row || (a.row == b.row && a.column <= b.column)
}

/// What traversals read from a node
pub trait NodeView: Copy {
    fn symbol(&self) -> u16;
    fn is_named(&self) -> bool;
    fn start_point(&self) -> Point;
    fn end_point(&self) -> Point;
    fn parent(&self) -> Option<Self>;
}

impl<'t> NodeView for Node<'t> {
    #[inline]
    fn symbol(&self) -> u16 {
        self.kind_id()
    }

    #[inline]
    fn is_named(&self) -> bool {
        Node::is_named(self)
    }

    #[inline]
    fn start_point(&self) -> Point {
        self.start_position()
    }

    #[inline]
    fn end_point(&self) -> Point {
        self.end_position()
    }

    fn parent(&self) -> Option<Self> {
        Node::parent(self)
    }
}

/// A cursor confined to the subtree it was positioned on: it never moves
/// to a sibling or parent of its starting node.
pub trait TreeWalker {
    type Node: NodeView;

    fn current_node(&self) -> Self::Node;
    /// Field id of the current node within its parent, 0 for none
    fn current_field_id(&self) -> u16;
    fn goto_first_child(&mut self) -> bool;
    fn goto_next_sibling(&mut self) -> bool;
    fn goto_parent(&mut self) -> bool;
}

/// Reusable engine cursor, created lazily on first use
#[derive(Default)]
pub struct ScratchCursor {
    raw: Option<ffi::TSTreeCursor>,
}

impl std::fmt::Debug for ScratchCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchCursor")
            .field("allocated", &self.raw.is_some())
            .finish()
    }
}

impl ScratchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position the cursor on `node` and borrow it for one traversal
    pub fn reset<'c, 't>(&'c mut self, node: Node<'t>) -> BoundCursor<'c, 't> {
        let raw_node = node.into_raw();
        let cursor = match self.raw.take() {
            Some(mut cursor) => {
                // SAFETY: `cursor` was created by `ts_tree_cursor_new` and is
                // exclusively owned here.
                unsafe { ffi::ts_tree_cursor_reset(&mut cursor, raw_node) };
                cursor
            }
            // SAFETY: `raw_node` is a live node of a tree borrowed for 't.
            None => unsafe { ffi::ts_tree_cursor_new(raw_node) },
        };
        BoundCursor {
            raw: self.raw.insert(cursor),
            _tree: PhantomData,
        }
    }

    /// Continue from the current position without resetting.
    ///
    /// # Safety
    ///
    /// The last [`ScratchCursor::reset`] must have been onto a node of
    /// `tree`, and `tree` must not have been edited since.
    pub(crate) unsafe fn resume<'c, 't>(&'c mut self, _tree: &'t Tree) -> Option<BoundCursor<'c, 't>> {
        self.raw.as_mut().map(|raw| BoundCursor {
            raw,
            _tree: PhantomData,
        })
    }
}

impl Drop for ScratchCursor {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.raw.take() {
            // SAFETY: created by `ts_tree_cursor_new`, deleted exactly once.
            unsafe { ffi::ts_tree_cursor_delete(&mut cursor) };
        }
    }
}

/// A [`ScratchCursor`] positioned inside a tree borrowed for `'t`
pub struct BoundCursor<'c, 't> {
    raw: &'c mut ffi::TSTreeCursor,
    _tree: PhantomData<&'t Tree>,
}

impl<'c, 't> TreeWalker for BoundCursor<'c, 't> {
    type Node = Node<'t>;

    fn current_node(&self) -> Node<'t> {
        // SAFETY: the cursor points into a tree that outlives 't.
        unsafe { Node::from_raw(ffi::ts_tree_cursor_current_node(&*self.raw)) }
    }

    fn current_field_id(&self) -> u16 {
        // SAFETY: see `current_node`.
        unsafe { ffi::ts_tree_cursor_current_field_id(&*self.raw) }
    }

    fn goto_first_child(&mut self) -> bool {
        // SAFETY: see `current_node`.
        unsafe { ffi::ts_tree_cursor_goto_first_child(&mut *self.raw) }
    }

    fn goto_next_sibling(&mut self) -> bool {
        // SAFETY: see `current_node`.
        unsafe { ffi::ts_tree_cursor_goto_next_sibling(&mut *self.raw) }
    }

    fn goto_parent(&mut self) -> bool {
        // SAFETY: see `current_node`.
        unsafe { ffi::ts_tree_cursor_goto_parent(&mut *self.raw) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_point_lte() {
        assert!(point_lte(Point::new(1, 9), Point::new(2, 0)));
        assert!(point_lte(Point::new(2, 0), Point::new(2, 0)));
        assert!(!point_lte(Point::new(2, 1), Point::new(2, 0)));
    }

    #[test]
    fn test_cursor_stays_inside_reset_subtree() {
        let tree = parse("a = 1\nb = 2\n");
        let first = tree.root_node().child(0).unwrap();
        let mut scratch = ScratchCursor::new();
        let mut cursor = scratch.reset(first);

        assert_eq!(cursor.current_node(), first);
        assert!(!cursor.goto_next_sibling());
        assert!(!cursor.goto_parent());
        assert!(cursor.goto_first_child());
        assert!(cursor.goto_parent());
        assert_eq!(cursor.current_node(), first);
    }

    #[test]
    fn test_scratch_cursor_moves_between_trees() {
        let left = parse("x = 1\n");
        let right = parse("def f():\n    pass\n");
        let mut scratch = ScratchCursor::new();

        let kind = scratch.reset(left.root_node()).current_node().kind();
        assert_eq!(kind, "module");

        let mut cursor = scratch.reset(right.root_node());
        assert!(cursor.goto_first_child());
        assert_eq!(cursor.current_node().kind(), "function_definition");
    }

    #[test]
    fn test_field_id_reported_at_cursor() {
        let tree = parse("def f():\n    pass\n");
        let language = tree_sitter_python::language();
        let name_field = u16::from(language.field_id_for_name("name").unwrap());
        let function = tree.root_node().child(0).unwrap();

        let mut scratch = ScratchCursor::new();
        let mut cursor = scratch.reset(function);
        assert!(cursor.goto_first_child());
        assert_eq!(cursor.current_field_id(), 0);
        assert!(cursor.goto_next_sibling());
        assert_eq!(cursor.current_node().kind(), "identifier");
        assert_eq!(cursor.current_field_id(), name_field);
    }
}
