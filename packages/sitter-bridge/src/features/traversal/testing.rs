//! In-memory tree with a cursor that honors the engine cursor's contract

use tree_sitter::Point;

use super::walker::{NodeView, TreeWalker};

#[derive(Debug, Clone)]
pub struct ArenaNode {
    pub symbol: u16,
    pub named: bool,
    pub field: u16,
    pub start: Point,
    pub end: Point,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct Arena {
    pub nodes: Vec<ArenaNode>,
}

/// Nested description used to build an [`Arena`]
#[derive(Debug, Clone)]
pub struct Shape {
    pub symbol: u16,
    pub named: bool,
    pub field: u16,
    pub children: Vec<Shape>,
}

impl Shape {
    pub fn leaf(symbol: u16) -> Self {
        Self {
            symbol,
            named: true,
            field: 0,
            children: Vec::new(),
        }
    }

    pub fn branch(symbol: u16, children: Vec<Shape>) -> Self {
        Self {
            symbol,
            named: true,
            field: 0,
            children,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.named = false;
        self
    }

    pub fn in_field(mut self, field: u16) -> Self {
        self.field = field;
        self
    }
}

impl Arena {
    /// Lay `shape` out one leaf per row: leaf `k` spans `(k,0)..(k,1)`.
    pub fn build(shape: &Shape) -> Self {
        let mut arena = Arena::default();
        let mut next_row = 0;
        arena.push(shape, None, &mut next_row);
        arena
    }

    fn push(&mut self, shape: &Shape, parent: Option<usize>, next_row: &mut usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(ArenaNode {
            symbol: shape.symbol,
            named: shape.named,
            field: shape.field,
            start: Point::new(*next_row, 0),
            end: Point::new(*next_row, 0),
            parent,
            children: Vec::new(),
        });

        if shape.children.is_empty() {
            self.nodes[index].end = Point::new(*next_row, 1);
            *next_row += 1;
            return index;
        }

        for child in &shape.children {
            let child_index = self.push(child, Some(index), next_row);
            self.nodes[index].children.push(child_index);
        }
        let first = self.nodes[index].children[0];
        let last = self.nodes[index].children[self.nodes[index].children.len() - 1];
        self.nodes[index].start = self.nodes[first].start;
        self.nodes[index].end = self.nodes[last].end;
        index
    }

    pub fn node(&self, index: usize) -> ArenaRef<'_> {
        ArenaRef { arena: self, index }
    }

    pub fn root(&self) -> ArenaRef<'_> {
        self.node(0)
    }

    pub fn cursor(&self, index: usize) -> ArenaCursor<'_> {
        ArenaCursor {
            arena: self,
            stack: vec![index],
        }
    }

    /// Recursive preorder, the reference the iterative walks are checked against
    pub fn preorder(&self, index: usize) -> Vec<usize> {
        let mut out = vec![index];
        for &child in &self.nodes[index].children {
            out.extend(self.preorder(child));
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArenaRef<'a> {
    arena: &'a Arena,
    pub index: usize,
}

impl PartialEq for ArenaRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.index == other.index
    }
}

impl<'a> ArenaRef<'a> {
    fn data(&self) -> &'a ArenaNode {
        &self.arena.nodes[self.index]
    }
}

impl<'a> NodeView for ArenaRef<'a> {
    fn symbol(&self) -> u16 {
        self.data().symbol
    }

    fn is_named(&self) -> bool {
        self.data().named
    }

    fn start_point(&self) -> Point {
        self.data().start
    }

    fn end_point(&self) -> Point {
        self.data().end
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|index| self.arena.node(index))
    }
}

pub struct ArenaCursor<'a> {
    arena: &'a Arena,
    stack: Vec<usize>,
}

impl<'a> ArenaCursor<'a> {
    fn top(&self) -> usize {
        self.stack[self.stack.len() - 1]
    }
}

impl<'a> TreeWalker for ArenaCursor<'a> {
    type Node = ArenaRef<'a>;

    fn current_node(&self) -> ArenaRef<'a> {
        self.arena.node(self.top())
    }

    fn current_field_id(&self) -> u16 {
        if self.stack.len() == 1 {
            return 0;
        }
        self.arena.nodes[self.top()].field
    }

    fn goto_first_child(&mut self) -> bool {
        match self.arena.nodes[self.top()].children.first() {
            Some(&child) => {
                self.stack.push(child);
                true
            }
            None => false,
        }
    }

    fn goto_next_sibling(&mut self) -> bool {
        if self.stack.len() < 2 {
            return false;
        }
        let current = self.top();
        let parent = self.stack[self.stack.len() - 2];
        let siblings = &self.arena.nodes[parent].children;
        let position = siblings.iter().position(|&c| c == current);
        match position.and_then(|p| siblings.get(p + 1)) {
            Some(&next) => {
                let last = self.stack.len() - 1;
                self.stack[last] = next;
                true
            }
            None => false,
        }
    }

    fn goto_parent(&mut self) -> bool {
        if self.stack.len() < 2 {
            return false;
        }
        self.stack.pop();
        true
    }
}
