//! Source span representation for parsed Python code

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// A contiguous region of source code.
///
/// Line numbers are 1-indexed; tree-sitter reports 0-indexed rows, so all
/// conversion from parser positions goes through [`SourceSpan::from_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the start of the span (inclusive)
    pub start: usize,
    /// Byte offset of the end of the span (exclusive)
    pub end: usize,
    /// Line number of the start (1-indexed)
    pub start_line: u32,
    /// Line number of the end (1-indexed)
    pub end_line: u32,
    /// Column number of the start (0-indexed, in bytes)
    pub start_col: u32,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize, start_line: u32, end_line: u32, start_col: u32) -> Self {
        SourceSpan {
            start,
            end,
            start_line,
            end_line,
            start_col,
        }
    }

    /// Build a span from a tree-sitter node, converting rows to 1-indexed lines
    pub fn from_node(node: &Node) -> Self {
        SourceSpan::new(
            node.start_byte(),
            node.end_byte(),
            node.start_position().row as u32 + 1,
            node.end_position().row as u32 + 1,
            node.start_position().column as u32,
        )
    }

    /// Get the length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
