//! Metric rows, per-file reports, sorting, and rendering
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Identical input yields byte-for-byte identical output

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One function's metrics. Immutable once produced; a row is identified
/// within its file by name and source position, so duplicate names in nested
/// scopes stay separate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub function_name: String,
    pub cognitive_complexity: usize,
    pub lines_of_code: usize,
    pub logical_lines_of_code: usize,
    pub function_arguments: usize,
}

/// All metric rows for one analyzed file, in discovery order unless sorted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file_path: String,
    pub rows: Vec<MetricRow>,
}

/// A sortable metric column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    FunctionName,
    CognitiveComplexity,
    LinesOfCode,
    LogicalLinesOfCode,
    FunctionArguments,
}

impl SortKey {
    /// Parse a field selector. Unknown names are a configuration error and
    /// must be rejected before any analysis begins.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "function_name" => Ok(SortKey::FunctionName),
            "cognitive_complexity" => Ok(SortKey::CognitiveComplexity),
            "lines_of_code" => Ok(SortKey::LinesOfCode),
            "logical_lines_of_code" => Ok(SortKey::LogicalLinesOfCode),
            "function_arguments" => Ok(SortKey::FunctionArguments),
            other => bail!(
                "unknown sort key '{}' (expected one of: function_name, \
                 cognitive_complexity, lines_of_code, logical_lines_of_code, \
                 function_arguments)",
                other
            ),
        }
    }

    /// The metric field name this key selects
    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::FunctionName => "function_name",
            SortKey::CognitiveComplexity => "cognitive_complexity",
            SortKey::LinesOfCode => "lines_of_code",
            SortKey::LogicalLinesOfCode => "logical_lines_of_code",
            SortKey::FunctionArguments => "function_arguments",
        }
    }
}

/// Parse an ordered list of sort-key selectors, failing on the first unknown
pub fn parse_sort_keys(names: &[String]) -> Result<Vec<SortKey>> {
    names.iter().map(|name| SortKey::parse(name)).collect()
}

/// Stable sort by the selected field tuple, each key ascending.
///
/// Rows with equal key tuples keep their discovery order.
pub fn sort_rows(rows: &mut [MetricRow], keys: &[SortKey]) {
    rows.sort_by(|a, b| {
        let mut ordering = Ordering::Equal;
        for key in keys {
            ordering = ordering.then_with(|| compare_by(a, b, *key));
        }
        ordering
    });
}

fn compare_by(a: &MetricRow, b: &MetricRow, key: SortKey) -> Ordering {
    match key {
        SortKey::FunctionName => a.function_name.cmp(&b.function_name),
        SortKey::CognitiveComplexity => a.cognitive_complexity.cmp(&b.cognitive_complexity),
        SortKey::LinesOfCode => a.lines_of_code.cmp(&b.lines_of_code),
        SortKey::LogicalLinesOfCode => a.logical_lines_of_code.cmp(&b.logical_lines_of_code),
        SortKey::FunctionArguments => a.function_arguments.cmp(&b.function_arguments),
    }
}

const COLUMNS: &[&str] = &[
    "function_name",
    "cognitive_complexity",
    "lines_of_code",
    "logical_lines_of_code",
    "function_arguments",
];

const COLUMN_WIDTH: usize = 22;

/// Render reports as aligned text tables.
///
/// Each file's block starts with its path label, then a header row and a
/// dashed separator; blocks are blank-line separated.
pub fn render_text(reports: &[FileReport]) -> String {
    let mut output = String::new();
    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&report.file_path);
        output.push('\n');

        let header: Vec<String> = COLUMNS.iter().map(|column| column.to_string()).collect();
        output.push_str(&table_line(&header));

        let dashes: Vec<String> = COLUMNS.iter().map(|_| "-".repeat(COLUMN_WIDTH)).collect();
        output.push_str(&table_line(&dashes));

        for row in &report.rows {
            let cells = vec![
                row.function_name.clone(),
                row.cognitive_complexity.to_string(),
                row.lines_of_code.to_string(),
                row.logical_lines_of_code.to_string(),
                row.function_arguments.to_string(),
            ];
            output.push_str(&table_line(&cells));
        }
    }
    output
}

/// Render reports as JSON output
pub fn render_json(reports: &[FileReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// One fixed-width `|`-separated table line; the last cell is left unpadded
fn table_line(cells: &[String]) -> String {
    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            line.push_str(" | ");
        }
        if index + 1 == cells.len() {
            line.push_str(cell);
        } else {
            line.push_str(&truncate_or_pad(cell, COLUMN_WIDTH));
        }
    }
    line.push('\n');
    line
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        format!("{}...", &s[..width.saturating_sub(3)])
    } else {
        format!("{:<width$}", s, width = width)
    }
}
