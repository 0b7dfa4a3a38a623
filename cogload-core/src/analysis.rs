//! Per-file analysis orchestration - ties together parsing, discovery,
//! scoring, measuring, and report assembly

use crate::cognitive;
use crate::collector;
use crate::parser;
use crate::report::{self, FileReport, MetricRow, SortKey};
use crate::size;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tree_sitter::Node;

/// Options applied to every analyzed file
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Ordered sort keys; empty keeps discovery order
    pub sort_keys: Vec<SortKey>,
    /// Count the explicit receiver (`self`/`cls`) of methods as a parameter
    pub count_receiver_parameter: bool,
}

/// Analyze one Python source file.
///
/// Returns `Ok(None)` when the file defines no functions; such files produce
/// no report at all.
pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<Option<FileReport>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let tree = parser::parse(&source, &path.to_string_lossy())?;
    build(tree.root_node(), &source, &path.to_string_lossy(), options)
}

/// Assemble a report from a parsed tree: collect once, then score and
/// measure each function, keeping rows in discovery order unless sort keys
/// are set.
///
/// A span that ends beyond the source marks an inconsistent tree/source
/// pairing; the whole file is rejected so a bad parse never yields bogus
/// numbers for its siblings within the file.
pub fn build(
    root: Node,
    source: &str,
    file_path: &str,
    options: &AnalysisOptions,
) -> Result<Option<FileReport>> {
    let records = collector::collect(root, source, options.count_receiver_parameter);
    if records.is_empty() {
        return Ok(None);
    }

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        if record.span.end > source.len() {
            bail!(
                "function '{}' in {}: span ends at byte {} but source is {} bytes",
                record.name,
                file_path,
                record.span.end,
                source.len()
            );
        }
        let (lines_of_code, logical_lines_of_code) = size::measure(record.node, &record.span)
            .with_context(|| format!("function '{}' in {}", record.name, file_path))?;
        rows.push(MetricRow {
            function_name: record.name.clone(),
            cognitive_complexity: cognitive::score(record.node, source),
            lines_of_code,
            logical_lines_of_code,
            function_arguments: record.parameter_count,
        });
    }

    if !options.sort_keys.is_empty() {
        report::sort_rows(&mut rows, &options.sort_keys);
    }

    Ok(Some(FileReport {
        file_path: file_path.to_string(),
        rows,
    }))
}
