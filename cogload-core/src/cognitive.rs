//! Cognitive complexity scoring
//!
//! Walks a function body and accumulates a score modeling how hard the
//! function is for a human to read. Control-flow constructs cost
//! `1 + nesting` and raise the nesting level for the duration of their
//! bodies; boolean operator runs, `elif` branches, and recursive calls cost
//! a flat +1 regardless of depth. A straight-line body scores 0.

use crate::collector::FUNCTION_KINDS;
use crate::walker::{find_child_by_kind, walk, Visit};
use tree_sitter::Node;

/// Statement constructs that receive a structural increment of `1 + nesting`
/// when entered. Their bodies nest one level deeper (see
/// [`NESTING_BLOCK_PARENTS`]); conditions and headers stay at the outer level.
const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "async_for_statement",
    "except_clause",
    "except_group_clause",
    "case_clause",
];

/// Parents whose block sits one nesting level below the surrounding code
const NESTING_BLOCK_PARENTS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "else_clause",
    "while_statement",
    "for_statement",
    "async_for_statement",
    "except_clause",
    "except_group_clause",
    "case_clause",
];

/// Score a single function definition node.
///
/// Only the body is walked; a definition with no body (possible in
/// error-recovered trees) scores 0. Nested definitions charge the act of
/// nesting and are otherwise left to their own records, so their internals
/// are never double-counted into the parent.
pub fn score(function: Node, source: &str) -> usize {
    let body = match find_child_by_kind(function, "block") {
        Some(body) => body,
        None => return 0,
    };
    let function_name = find_child_by_kind(function, "identifier")
        .map(|name| source[name.start_byte()..name.end_byte()].to_string());

    let mut visitor = ScoreVisitor {
        source,
        function_name,
        total: 0,
        nesting: 0,
    };
    walk(body, &mut visitor);
    visitor.total
}

/// Accumulator threaded through the walk. Nesting bookkeeping is explicit
/// state here, restored in `leave` when a construct's body ends.
struct ScoreVisitor<'src> {
    source: &'src str,
    function_name: Option<String>,
    total: usize,
    nesting: usize,
}

impl<'tree> Visit<'tree> for ScoreVisitor<'_> {
    fn enter(&mut self, node: Node<'tree>) -> bool {
        let kind = node.kind();
        if FUNCTION_KINDS.contains(&kind) {
            // A nested definition costs the act of nesting; its body is
            // scored by its own record, so the walk stops here.
            self.total += 1 + self.nesting;
            return false;
        }
        match kind {
            k if BRANCH_KINDS.contains(&k) => self.total += 1 + self.nesting,
            "conditional_expression" | "lambda" => {
                self.total += 1 + self.nesting;
                self.nesting += 1;
            }
            "elif_clause" => self.total += 1,
            "block" => {
                if block_nests(node) {
                    self.nesting += 1;
                }
            }
            "boolean_operator" => {
                if starts_operator_run(node) {
                    self.total += 1;
                }
            }
            "call" => {
                if self.is_recursive_call(node) {
                    self.total += 1;
                }
            }
            _ => {}
        }
        true
    }

    fn leave(&mut self, node: Node<'tree>) {
        match node.kind() {
            "conditional_expression" | "lambda" => self.nesting -= 1,
            "block" if block_nests(node) => self.nesting -= 1,
            _ => {}
        }
    }
}

impl ScoreVisitor<'_> {
    /// A call back into the enclosing function, matched by name; direct
    /// calls and `self.name(...)` method calls both qualify.
    fn is_recursive_call(&self, node: Node) -> bool {
        let name = match &self.function_name {
            Some(name) => name.as_str(),
            None => return false,
        };
        let callee = match node.child_by_field_name("function") {
            Some(callee) => callee,
            None => return false,
        };
        let callee_name = match callee.kind() {
            "identifier" => &self.source[callee.start_byte()..callee.end_byte()],
            "attribute" => match callee.child_by_field_name("attribute") {
                Some(attr) => &self.source[attr.start_byte()..attr.end_byte()],
                None => return false,
            },
            _ => return false,
        };
        callee_name == name
    }
}

fn block_nests(node: Node) -> bool {
    node.parent()
        .is_some_and(|parent| NESTING_BLOCK_PARENTS.contains(&parent.kind()))
}

/// A boolean operator opens a new run unless its parent chains the same
/// operator: `a and b and c` is one run, `a and b or c` is two.
fn starts_operator_run(node: Node) -> bool {
    let operator = operator_token(node);
    match node.parent() {
        Some(parent) if parent.kind() == "boolean_operator" => operator_token(parent) != operator,
        _ => true,
    }
}

fn operator_token(node: Node) -> Option<&'static str> {
    node.child_by_field_name("operator").map(|op| op.kind())
}
