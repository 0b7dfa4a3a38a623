//! Configuration file support for cogload
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.cogloadrc.json` in project root
//! 3. `cogload.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::report::{self, SortKey};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default exclude patterns applied when no exclude list is configured
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/__pycache__/**",
    "**/venv/**",
    "**/.venv/**",
    "**/site-packages/**",
    "**/build/**",
    "**/dist/**",
];

/// Cogload configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CogloadConfig {
    /// Glob patterns for files to include (default: all Python sources)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: caches and virtualenvs)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Ordered metric field names used to sort each file's rows
    #[serde(default)]
    pub sort_by: Vec<String>,

    /// Count the explicit receiver of methods as a parameter (default: false)
    #[serde(default)]
    pub count_receiver_parameter: Option<bool>,
}

impl CogloadConfig {
    /// Validate the configuration for logical errors.
    ///
    /// Runs before any analysis: an unknown sort key or a bad glob aborts
    /// the whole run with no partial output.
    pub fn validate(&self) -> Result<()> {
        report::parse_sort_keys(&self.sort_by)?;
        for pattern in self.include.iter().chain(self.exclude.iter()) {
            Glob::new(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;
        }
        Ok(())
    }
}

/// Resolved configuration with compiled globs and validated sort keys
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Compiled include patterns (None means include all)
    pub include: Option<GlobSet>,
    /// Compiled exclude patterns
    pub exclude: GlobSet,
    /// Validated sort keys; empty keeps discovery order
    pub sort_keys: Vec<SortKey>,
    /// Count the explicit receiver of methods as a parameter
    pub count_receiver_parameter: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Whether a file passes the include/exclude filter
    pub fn should_include(&self, path: &Path) -> bool {
        if self.exclude.is_match(path) {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(path),
            None => true,
        }
    }
}

/// Load configuration from disk and resolve it, or fall back to defaults
pub fn load_and_resolve(project_root: &Path, explicit_path: Option<&Path>) -> Result<ResolvedConfig> {
    let found = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(project_root),
    };

    let config = match &found {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str::<CogloadConfig>(&text)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => CogloadConfig::default(),
    };

    resolve(config, found)
}

fn discover_config(project_root: &Path) -> Option<PathBuf> {
    for name in [".cogloadrc.json", "cogload.config.json"] {
        let candidate = project_root.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn resolve(config: CogloadConfig, config_path: Option<PathBuf>) -> Result<ResolvedConfig> {
    config.validate()?;

    let sort_keys = report::parse_sort_keys(&config.sort_by)?;
    let include = if config.include.is_empty() {
        None
    } else {
        Some(build_glob_set(&config.include)?)
    };
    let exclude_patterns: Vec<String> = if config.exclude.is_empty() {
        DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
    } else {
        config.exclude.clone()
    };
    let exclude = build_glob_set(&exclude_patterns)?;

    Ok(ResolvedConfig {
        include,
        exclude,
        sort_keys,
        count_receiver_parameter: config.count_receiver_parameter.unwrap_or(false),
        config_path,
    })
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder
            .add(Glob::new(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?);
    }
    builder.build().context("failed to compile glob patterns")
}
