//! Test fixture generators

use sitter_bridge::{BridgeContext, BundledLanguage, SyntaxTree};

/// Python file with N one-line functions
pub fn fixture_n_functions(n: usize) -> String {
    (0..n).map(|i| format!("def func_{i}(): pass\n")).collect()
}

/// A function spanning rows 0-5 with a lone integer on row 2
pub fn fixture_function_with_literal() -> &'static str {
    "def f():\n    pass\n    42\n    pass\n    pass\n    return\n"
}

/// A class with methods that call each other
pub fn fixture_class_with_calls(method_count: usize) -> String {
    let methods: String = (0..method_count)
        .map(|i| format!("    def method_{i}(self, x):\n        return self.method_{}(x + {i})\n", i + 1))
        .collect();
    format!("class Worker:\n{methods}")
}

pub fn parse_python(source: &str) -> SyntaxTree {
    SyntaxTree::parse_with_defaults(BundledLanguage::Python, source).expect("python source should parse")
}

pub fn setup(source: &str) -> (BridgeContext, SyntaxTree) {
    (BridgeContext::default(), parse_python(source))
}

/// Every node of the tree, in preorder
pub fn all_nodes(tree: &SyntaxTree) -> Vec<tree_sitter::Node<'_>> {
    let mut nodes = Vec::new();
    let mut cursor = tree.root().walk();
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        nodes.push(node);
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    nodes
}
