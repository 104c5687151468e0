//! File Command
//!
//! Implements `docport file`: document a single runtime file from a saved
//! `javadocs.json`.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::transfer::{load_saved_javadocs, print_dry_run_diff, print_file_report, RunSettings};
use crate::config::Config;
use crate::javadoc::count_types;

/// Options for the file command
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    pub path: PathBuf,
    /// Saved documentation tree; the configured output path when unset
    pub javadocs_json: Option<PathBuf>,
    pub settings: RunSettings,
}

/// Execute the file command
pub fn execute_file(options: FileOptions, config: Config) -> Result<()> {
    anyhow::ensure!(
        options.path.is_file(),
        "File not found: {}",
        options.path.display()
    );

    let javadocs_path = options
        .javadocs_json
        .clone()
        .unwrap_or_else(|| config.output.javadocs.clone());
    let java_types = load_saved_javadocs(&javadocs_path)?;
    println!(
        "{} Loaded {} types from {}",
        style("→").cyan(),
        count_types(&java_types),
        javadocs_path.display()
    );

    let llm = options.settings.llm(&config)?;
    let transferer = options.settings.transferer(llm.as_ref(), &config, None)?;

    let path = options.path.to_string_lossy().to_string();
    let report = transferer.transfer_file(&path, &java_types, options.settings.dry_run);

    print_file_report(&report);
    if options.settings.dry_run {
        print_dry_run_diff(&report);
    }
    println!("  Tokens used: {}", report.usage);

    if let crate::transfer::FileStatus::Failed(message) = &report.status {
        anyhow::bail!("{}: {}", path, message);
    }
    Ok(())
}
