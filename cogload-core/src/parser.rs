//! Python parsing using tree-sitter

use anyhow::{Context, Result};
use tree_sitter::{Parser, Tree};

/// Parse Python source into a syntax tree.
///
/// tree-sitter is error-tolerant: source with syntax errors still yields a
/// tree, with ERROR nodes where recovery kicked in.
pub fn parse(source: &str, filename: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .context("Failed to set Python language")?;

    parser
        .parse(source, None)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse Python file: {}", filename))
}
