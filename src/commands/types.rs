//! Types Command
//!
//! Implements `docport types`: list the type declarations found in each
//! runtime file. Makes no model requests.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::extract::extract_types_from_dir;

/// Options for the types command
#[derive(Debug, Clone, Default)]
pub struct TypesOptions {
    pub root: PathBuf,
    /// Print JSON instead of a listing
    pub json: bool,
}

/// Execute the types command
pub fn execute_types(options: TypesOptions, config: Config) -> Result<()> {
    anyhow::ensure!(
        options.root.is_dir(),
        "Directory not found: {}",
        options.root.display()
    );

    let infos: Vec<_> = extract_types_from_dir(&options.root, &config.extract_options())
        .into_iter()
        .filter(|info| !info.is_empty())
        .collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    for info in &infos {
        println!("{}", style(&info.file).bold());
        for name in &info.types {
            println!("  {}", name);
        }
    }

    let total: usize = infos.iter().map(|i| i.types.len()).sum();
    println!();
    println!(
        "{} {} types in {} files",
        style("✓").green(),
        total,
        infos.len()
    );
    Ok(())
}
