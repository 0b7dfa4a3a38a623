//! Generic pre-order traversal over syntax tree nodes
//!
//! The walker owns no analysis logic; accumulator state lives on the visitor
//! structs the metric components pass in.

use tree_sitter::Node;

/// Visitor applied by [`walk`] to every node in a subtree.
///
/// `enter` runs in pre-order; returning `false` skips the node's children
/// (and its `leave` call). `leave` runs after the children, which lets
/// visitors restore scoped state such as a nesting level.
pub trait Visit<'tree> {
    fn enter(&mut self, node: Node<'tree>) -> bool;

    fn leave(&mut self, _node: Node<'tree>) {}
}

/// Apply `visitor` to `node` and every descendant, depth-first, pre-order.
///
/// The tree is never mutated; side effects are confined to the visitor.
pub fn walk<'tree, V: Visit<'tree>>(node: Node<'tree>, visitor: &mut V) {
    if !visitor.enter(node) {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, visitor);
    }
    visitor.leave(node);
}

/// First direct child of `node` with the given kind, if any
pub fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}
