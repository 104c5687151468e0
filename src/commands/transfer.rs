//! Transfer Command
//!
//! Implements `docport transfer`: document every runtime file from a Java
//! source tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use similar::TextDiff;

use crate::config::Config;
use crate::javadoc::{count_source_files, count_types, extract_javadocs_from_dir, JavaType};
use crate::llm::{create_llm, Llm};
use crate::matcher::MatchStrategy;
use crate::transfer::debug::DebugDump;
use crate::transfer::{collect_runtime_files, FileReport, FileStatus, LoopEnd, Transferer};

/// Model and loop settings shared by `transfer` and `file`.
/// Unset fields fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub api_key: Option<String>,
    pub matcher: Option<MatchStrategy>,
    pub max_passes: Option<usize>,
    /// Preview as a diff instead of writing files
    pub dry_run: bool,
    /// Dump prompts and answers to the debug directory
    pub debug: bool,
}

impl RunSettings {
    /// Build the model client these settings select
    pub fn llm(&self, config: &Config) -> Result<Box<dyn Llm>> {
        let model = self.model.as_deref().unwrap_or(&config.llm.model);
        let llm = create_llm(
            model,
            self.api_key.as_deref(),
            self.temperature.unwrap_or(config.llm.temperature),
            config.llm.max_output_tokens,
            Duration::from_secs(config.llm.timeout_secs),
        )?;
        Ok(llm)
    }

    /// Transferer on `llm` with config defaults and these overrides.
    /// Debug dumps are laid out below `runtime` when given.
    pub fn transferer<'a>(
        &self,
        llm: &'a dyn Llm,
        config: &Config,
        runtime: Option<&Path>,
    ) -> Result<Transferer<'a>> {
        let mut options = config.transfer_options();
        if let Some(matcher) = self.matcher {
            options.matcher = matcher;
        }
        if let Some(max_passes) = self.max_passes {
            anyhow::ensure!(max_passes > 0, "--max-passes must be at least 1");
            options.max_passes = max_passes;
        }

        let mut transferer = Transferer::new(llm, options)?;
        if self.debug {
            let mut dump = DebugDump::new(&config.transfer.debug_dir);
            if let Some(root) = runtime {
                dump = dump.with_root(root);
            }
            println!(
                "{} Writing prompts to {}",
                style("→").cyan(),
                dump.dir().display()
            );
            transferer = transferer.with_debug(dump);
        }
        Ok(transferer)
    }
}

/// Options for the transfer command
#[derive(Debug, Clone)]
pub struct TransferCommandOptions {
    /// Java source tree
    pub javadocs: PathBuf,
    /// Runtime to document
    pub runtime: PathBuf,
    pub settings: RunSettings,
    /// Write a JSON run report here
    pub report: Option<PathBuf>,
}

impl Default for TransferCommandOptions {
    fn default() -> Self {
        Self {
            javadocs: PathBuf::from("."),
            runtime: PathBuf::from("."),
            settings: RunSettings::default(),
            report: None,
        }
    }
}

/// Execute the transfer command
pub fn execute_transfer(options: TransferCommandOptions, config: Config) -> Result<()> {
    anyhow::ensure!(
        options.javadocs.is_dir(),
        "Java source directory not found: {}",
        options.javadocs.display()
    );
    anyhow::ensure!(
        options.runtime.is_dir(),
        "Runtime directory not found: {}",
        options.runtime.display()
    );

    let llm = options.settings.llm(&config)?;
    println!(
        "{} Using {} model {}",
        style("→").cyan(),
        llm.name(),
        style(llm.model()).bold()
    );

    println!(
        "{} Extracting Javadocs from {}...",
        style("→").cyan(),
        options.javadocs.display()
    );
    let java_types = extract_javadocs_from_dir(&options.javadocs);
    println!(
        "  Found {} types in {} files",
        count_types(&java_types),
        count_source_files(&java_types)
    );

    let files = collect_runtime_files(
        &options.runtime,
        &config.transfer.extensions,
        &config.transfer.exclude,
    );
    if files.is_empty() {
        println!(
            "{} No runtime files found in {}",
            style("⚠").yellow(),
            options.runtime.display()
        );
        return Ok(());
    }
    println!("  Found {} runtime files", files.len());

    let transferer =
        options
            .settings
            .transferer(llm.as_ref(), &config, Some(options.runtime.as_path()))?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ETA {eta} {wide_msg}")?
            .progress_chars("█▓░"),
    );

    let dry_run = options.settings.dry_run;
    let summary = transferer.transfer_files(&files, &java_types, dry_run, &mut |_, _, report| {
        pb.suspend(|| {
            print_file_report(report);
            if dry_run {
                print_dry_run_diff(report);
            }
        });
        pb.set_message(display_name(&report.path));
        pb.inc(1);
    });
    pb.finish_and_clear();

    println!();
    println!("{} Transfer complete", style("✓").green());
    println!("  Files:           {}", summary.total_files());
    println!("  Files processed: {}", summary.processed);
    if summary.failed > 0 {
        println!("  Files failed:    {}", style(summary.failed).red());
    }
    println!("  Tokens used:     {}", summary.usage);
    println!("  Elapsed:         {:.1}s", summary.elapsed_secs);

    if let Some(report_path) = &options.report {
        summary
            .save(report_path)
            .with_context(|| format!("writing report to {}", report_path.display()))?;
        println!("  Report:          {}", report_path.display());
    }

    Ok(())
}

/// Java types to transfer, from a saved `javadocs.json`
pub(crate) fn load_saved_javadocs(path: &Path) -> Result<Vec<JavaType>> {
    crate::javadoc::load_javadocs(path).with_context(|| {
        format!(
            "reading {} (run `docport extract` first)",
            path.display()
        )
    })
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// One line per finished file
pub(crate) fn print_file_report(report: &FileReport) {
    let name = display_name(&report.path);
    match &report.status {
        FileStatus::NoTypes => println!("  {} {} (no types)", style("-").dim(), name),
        FileStatus::NoMappings => println!("  {} {} (no mapped Java types)", style("-").dim(), name),
        FileStatus::NoMatches => println!("  {} {} (no matching Javadocs)", style("-").dim(), name),
        FileStatus::Documented(outcome) => {
            let note = match outcome.end {
                LoopEnd::Converged => String::new(),
                LoopEnd::CapReached => format!(" {}", style("(pass limit reached)").yellow()),
            };
            println!(
                "  {} {} ({} edits, {} passes, {} tokens){}",
                style("✓").green(),
                name,
                outcome.applied,
                outcome.passes,
                report.usage.total_tokens,
                note
            );
        }
        FileStatus::Failed(message) => {
            println!("  {} {}: {}", style("✗").red(), name, message)
        }
    }
}

/// Unified diff between the file on disk and the documented text
pub(crate) fn print_dry_run_diff(report: &FileReport) {
    let Some(code) = report.code() else {
        return;
    };
    let Ok(original) = std::fs::read_to_string(&report.path) else {
        return;
    };
    if original == code {
        return;
    }

    let diff = TextDiff::from_lines(original.as_str(), code);
    print!(
        "{}",
        diff.unified_diff()
            .context_radius(3)
            .header(&report.path, &format!("{} (documented)", report.path))
    );
}
