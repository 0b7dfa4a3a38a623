//! Cogload CLI - per-function cognitive complexity and size metrics for
//! Python sources

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use cogload_core::config;
use cogload_core::report;
use cogload_core::{analyze_with_config, render_json, render_text, AnalysisOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cogload")]
#[command(about = "Per-function cognitive complexity and size metrics for Python sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a Python source file or directory
    Analyze {
        /// Path to source file or directory
        path: PathBuf,

        /// Comma-separated metric fields to sort each file's rows by
        /// (default: discovery order)
        #[arg(long, value_delimiter = ',')]
        sort: Vec<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or inspect a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running analysis
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            sort,
            format,
            config: config_path,
        } => {
            // Normalize path to absolute
            let normalized_path = if path.is_relative() {
                std::env::current_dir()?.join(&path)
            } else {
                path
            };

            if !normalized_path.exists() {
                anyhow::bail!("Path does not exist: {}", normalized_path.display());
            }

            let project_root = project_root_of(&normalized_path);
            let resolved_config = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            if let Some(config_path) = &resolved_config.config_path {
                eprintln!("Using config: {}", config_path.display());
            }

            // CLI flags override config file values; sort keys are validated
            // here, before any file is analyzed
            let sort_keys = if sort.is_empty() {
                resolved_config.sort_keys.clone()
            } else {
                report::parse_sort_keys(&sort)?
            };

            let options = AnalysisOptions {
                sort_keys,
                count_receiver_parameter: resolved_config.count_receiver_parameter,
            };

            let reports = analyze_with_config(&normalized_path, options, Some(&resolved_config))?;

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&reports));
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&reports));
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                if resolved.sort_keys.is_empty() {
                    println!("Sort keys: discovery order");
                } else {
                    let names: Vec<&str> = resolved
                        .sort_keys
                        .iter()
                        .map(|key| key.field_name())
                        .collect();
                    println!("Sort keys: {}", names.join(", "));
                }
                println!(
                    "Count receiver parameter: {}",
                    resolved.count_receiver_parameter
                );
                println!(
                    "Include: {}",
                    if resolved.include.is_some() {
                        "custom patterns"
                    } else {
                        "all Python files"
                    }
                );
            }
        },
    }

    Ok(())
}

/// Directory the config file is discovered in for a given analysis target
fn project_root_of(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        path.to_path_buf()
    }
}
