//! Extract Command
//!
//! Implements `docport extract`: collect Javadocs from a Java source tree
//! and save them as `javadocs.json`.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::javadoc::{count_source_files, count_types, extract_javadocs_from_dir, save_javadocs};

/// Options for the extract command
#[derive(Debug, Clone, Default)]
pub struct ExtractCommandOptions {
    /// Java source tree
    pub java_dir: PathBuf,
    /// Output file; the configured path when unset
    pub output: Option<PathBuf>,
}

/// Execute the extract command
pub fn execute_extract(options: ExtractCommandOptions, config: Config) -> Result<()> {
    anyhow::ensure!(
        options.java_dir.is_dir(),
        "Java source directory not found: {}",
        options.java_dir.display()
    );

    println!(
        "{} Extracting Javadocs from {}...",
        style("→").cyan(),
        options.java_dir.display()
    );
    let java_types = extract_javadocs_from_dir(&options.java_dir);

    let output = options.output.unwrap_or(config.output.javadocs);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    save_javadocs(&output, &java_types)?;

    println!("{} Javadocs extracted", style("✓").green());
    println!("  Types:        {}", count_types(&java_types));
    println!("  Source files: {}", count_source_files(&java_types));
    println!("  Output:       {}", output.display());
    Ok(())
}
