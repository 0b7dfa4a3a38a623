//! Size metric extraction
//!
//! Physical size comes straight from the definition's source span; logical
//! size counts executable statement structure, so blank lines, comments, and
//! docstrings never move the logical count.

use crate::span::SourceSpan;
use crate::walker::{walk, Visit};
use anyhow::{bail, Result};
use tree_sitter::Node;

/// Simple statements counted as one logical line each.
/// `expression_statement` is handled separately for docstring exclusion.
const SIMPLE_STATEMENT_KINDS: &[&str] = &[
    "return_statement",
    "pass_statement",
    "break_statement",
    "continue_statement",
    "raise_statement",
    "assert_statement",
    "delete_statement",
    "global_statement",
    "nonlocal_statement",
    "import_statement",
    "import_from_statement",
    "future_import_statement",
    "exec_statement",
    "print_statement",
];

/// Compound statement headers and branch clauses: one logical line each,
/// bodies counted recursively.
const HEADER_KINDS: &[&str] = &[
    "function_definition",
    "async_function_definition",
    "class_definition",
    "if_statement",
    "elif_clause",
    "else_clause",
    "while_statement",
    "for_statement",
    "async_for_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "async_with_statement",
    "match_statement",
    "case_clause",
];

/// Measure a function definition: physical lines from its span, logical
/// lines from its statement structure.
///
/// Nested definition bodies count toward the enclosing function; the nested
/// function is measured again independently for its own row. A span whose
/// end precedes its start is a hard error, never a negative count.
pub fn measure(function: Node, span: &SourceSpan) -> Result<(usize, usize)> {
    if span.end_line < span.start_line {
        bail!(
            "malformed span: end line {} precedes start line {}",
            span.end_line,
            span.start_line
        );
    }
    let lines_of_code = (span.end_line - span.start_line + 1) as usize;

    let mut visitor = SizeVisitor { logical_lines: 0 };
    walk(function, &mut visitor);

    Ok((lines_of_code, visitor.logical_lines))
}

struct SizeVisitor {
    logical_lines: usize,
}

impl<'tree> Visit<'tree> for SizeVisitor {
    fn enter(&mut self, node: Node<'tree>) -> bool {
        let kind = node.kind();
        if kind == "expression_statement" {
            if !is_declaration_only(node) {
                self.logical_lines += 1;
            }
            return false;
        }
        if SIMPLE_STATEMENT_KINDS.contains(&kind) {
            self.logical_lines += 1;
            return false;
        }
        if HEADER_KINDS.contains(&kind) || kind == "decorator" {
            self.logical_lines += 1;
            return kind != "decorator";
        }
        true
    }
}

/// Docstrings and bare `...` placeholders execute nothing worth counting
fn is_declaration_only(node: Node) -> bool {
    node.named_child_count() == 1
        && node
            .named_child(0)
            .is_some_and(|child| matches!(child.kind(), "string" | "ellipsis"))
}
