#![forbid(unsafe_code)]
//! docport Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use docport::commands::{
    execute_extract, execute_file, execute_models, execute_transfer, execute_types,
    ExtractCommandOptions, FileOptions, RunSettings, TransferCommandOptions, TypesOptions,
};
use docport::config::CONFIG_FILE;
use docport::{Config, MatchStrategy};

#[derive(Parser)]
#[command(name = "docport")]
#[command(about = "Port Javadoc from Java sources onto other-language runtimes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract Javadocs from a Java source tree into JSON
    Extract {
        /// Java source directory
        java_dir: PathBuf,

        /// Output file (default: output.javadocs from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the types declared in each runtime file
    Types {
        /// Runtime directory
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer Javadocs onto every file of a runtime
    Transfer {
        /// Java source directory
        #[arg(long)]
        javadocs: PathBuf,

        /// Runtime directory to document
        #[arg(long)]
        runtime: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        /// Write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Transfer Javadocs onto a single file
    File {
        /// File to document
        path: PathBuf,

        /// Saved Javadocs (default: output.javadocs from config)
        #[arg(long)]
        javadocs_json: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// List supported models
    Models,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Model id (see `docport models`)
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    temperature: Option<f32>,

    /// API key (default: the provider's environment variable)
    #[arg(short = 'k', long = "key", env = "DOCPORT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// How runtime types are matched to Java types
    #[arg(long, value_enum)]
    matcher: Option<MatcherArg>,

    /// Generate requests allowed per file
    #[arg(long)]
    max_passes: Option<usize>,

    /// Print a diff instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Dump prompts and responses to the debug directory
    #[arg(long)]
    debug: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum MatcherArg {
    #[default]
    Llm,
    Heuristic,
}

impl From<MatcherArg> for MatchStrategy {
    fn from(arg: MatcherArg) -> Self {
        match arg {
            MatcherArg::Llm => MatchStrategy::Llm,
            MatcherArg::Heuristic => MatchStrategy::Heuristic,
        }
    }
}

impl From<RunArgs> for RunSettings {
    fn from(args: RunArgs) -> Self {
        Self {
            model: args.model,
            temperature: args.temperature,
            api_key: args.api_key,
            matcher: args.matcher.map(Into::into),
            max_passes: args.max_passes,
            dry_run: args.dry_run,
            debug: args.debug,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "docport=debug" } else { "docport=warn" };
    let filter = EnvFilter::try_from_env("DOCPORT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("✗").red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config
    let config = Config::load_if_exists(&cli.config)?;

    match cli.command {
        Commands::Extract { java_dir, output } => {
            execute_extract(ExtractCommandOptions { java_dir, output }, config)
        }
        Commands::Types { root, json } => execute_types(TypesOptions { root, json }, config),
        Commands::Transfer {
            javadocs,
            runtime,
            run,
            report,
        } => {
            let options = TransferCommandOptions {
                javadocs,
                runtime,
                settings: run.into(),
                report,
            };
            execute_transfer(options, config)
        }
        Commands::File {
            path,
            javadocs_json,
            run,
        } => {
            let options = FileOptions {
                path,
                javadocs_json,
                settings: run.into(),
            };
            execute_file(options, config)
        }
        Commands::Models => execute_models(),
    }
}
