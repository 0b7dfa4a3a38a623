//! Cogload core library - per-function cognitive complexity and size metrics
//! for Python sources

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Analysis is strictly per-function
// - No global mutable state; nothing persists across files
// - Deterministic traversal order must be explicit
// - Formatting, comments, and whitespace must not affect metric results
// - Identical input yields byte-for-byte identical output

pub mod analysis;
pub mod cognitive;
pub mod collector;
pub mod config;
pub mod parser;
pub mod report;
pub mod size;
pub mod span;
pub mod walker;

pub use analysis::{analyze_file, AnalysisOptions};
pub use config::ResolvedConfig;
pub use report::{render_json, render_text, FileReport, MetricRow, SortKey};

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Analyze Python files at the given path with default configuration
pub fn analyze(path: &Path, options: AnalysisOptions) -> Result<Vec<FileReport>> {
    analyze_with_config(path, options, None)
}

/// Analyze Python files at the given path with optional resolved configuration.
///
/// Files are discovered in sorted order and analyzed independently, in
/// parallel; no state crosses files, so reports come back in discovery order
/// regardless of scheduling. A file that fails analysis is reported on stderr
/// and skipped without aborting its siblings.
pub fn analyze_with_config(
    path: &Path,
    options: AnalysisOptions,
    resolved_config: Option<&ResolvedConfig>,
) -> Result<Vec<FileReport>> {
    let source_files = collect_source_files(path)?;
    let candidates: Vec<PathBuf> = source_files
        .into_iter()
        .filter(|file| resolved_config.map_or(true, |config| config.should_include(file)))
        .collect();

    let outcomes: Vec<(PathBuf, Result<Option<FileReport>>)> = candidates
        .into_par_iter()
        .map(|file| {
            let outcome = analysis::analyze_file(&file, &options);
            (file, outcome)
        })
        .collect();

    let mut reports = Vec::new();
    let mut skipped_files: usize = 0;
    for (file, outcome) in outcomes {
        match outcome {
            Ok(Some(report)) => reports.push(report),
            // Files with no function definitions emit nothing
            Ok(None) => {}
            Err(e) => {
                eprintln!("warning: skipping file {}: {}", file.display(), e);
                skipped_files += 1;
            }
        }
    }
    if skipped_files > 0 {
        eprintln!("Skipped {} file(s) due to analysis errors", skipped_files);
    }

    Ok(reports)
}

/// Check if a file is a Python source file (.py, .pyw)
fn is_python_source_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "py" | "pyw"))
}

/// Collect all Python source files from a path (file or directory)
fn collect_source_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            if is_python_source_file(filename) {
                files.push(path.to_path_buf());
            }
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, &mut files)?;
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Returns true for directory names that should not be traversed
fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.')
        || name == "__pycache__"
        || name == "venv"
        || name == "site-packages"
        || name == "build"
        || name == "dist"
}

/// Process one directory entry, pushing source files or recursing into dirs
fn process_dir_entry(
    path: PathBuf,
    metadata: std::fs::Metadata,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    use std::ffi::OsStr;

    if metadata.is_symlink() {
        return Ok(());
    }

    if metadata.is_dir() {
        if let Some(name) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
            if is_skipped_dir(name) {
                return Ok(());
            }
        }
        collect_source_files_recursive(&path, files)?;
    } else if metadata.is_file() {
        if let Some(filename) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
            if is_python_source_file(filename) {
                files.push(path);
            }
        }
    }

    Ok(())
}

/// Recursively collect Python source files from a directory
fn collect_source_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
        process_dir_entry(path, metadata, files)?;
    }

    Ok(())
}
