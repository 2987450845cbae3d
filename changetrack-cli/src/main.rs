//! changetrack CLI - semantic version impact of C# API changes
//!
//! Compares the public surface of two versions of a C# code base and tells
//! whether the change is breaking, a feature, or neither.

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use changetrack_core::AttributeCompareOption;

mod commands;
mod config;
mod output;

use commands::compare::CompareArgs;
use commands::*;
use config::{ChangetrackConfig, FailOn};
use output::{OutputConfig, OutputFormat};

/// Parse an attribute comparison mode (skip, by-expression, all)
fn parse_attribute_mode(s: &str) -> Result<AttributeCompareOption, String> {
    s.parse()
}

/// Semantic version impact of C# API changes.
///
/// changetrack matches the declarations of an old and a new version of an
/// API, compares every pair and classifies the overall change.
#[derive(Parser)]
#[command(name = "changetrack")]
#[command(author, version)]
#[command(about = "Semantic version impact of C# API changes")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  changetrack compare v1/src v2/src                 Report changes between two trees
  changetrack compare Old.cs New.cs --format json   Machine-readable report
  changetrack compare base head --fail-on breaking  Fail CI on breaking changes")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two versions of an API (files or directories)
    #[command(visible_alias = "c")]
    Compare {
        /// Old version: a .cs file or a directory
        old: PathBuf,

        /// New version: a .cs file or a directory
        new: PathBuf,

        /// Attribute comparison mode: skip, by-expression, all
        #[arg(long, value_parser = parse_attribute_mode)]
        attributes: Option<AttributeCompareOption>,

        /// Regular expression selecting attributes to compare (repeatable)
        #[arg(long = "attribute-pattern", value_name = "REGEX")]
        attribute_patterns: Vec<String>,

        /// Exit with status 1 when the verdict reaches this level
        #[arg(long, value_enum)]
        fail_on: Option<FailOn>,

        /// Number of parser threads (defaults to the number of CPUs)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .changetrack.toml
    let config = ChangetrackConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return Ok(());
    };

    match command {
        Commands::Compare {
            old,
            new,
            attributes,
            attribute_patterns,
            fail_on,
            threads,
        } => {
            let attribute_patterns = if attribute_patterns.is_empty() {
                config.attribute_patterns().to_vec()
            } else {
                attribute_patterns
            };
            let args = CompareArgs {
                old,
                new,
                attributes: attributes
                    .or_else(|| config.attribute_mode())
                    .unwrap_or_default(),
                attribute_patterns,
                threads,
            };
            let fail_on = fail_on.or(config.fail_on()).unwrap_or_default();

            let output = OutputConfig::auto_detect(format, config.use_color());
            let verdict = compare::run(args, output).await?;
            if fail_on.is_reached(verdict) {
                tracing::debug!(verdict = verdict.as_str(), "Verdict reached --fail-on threshold");
                std::io::stdout().flush()?;
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                completions::run_instructions(shell, format)
            } else {
                let mut cmd = Cli::command();
                completions::generate_completions(shell, &mut cmd, &mut std::io::stdout());
                Ok(())
            }
        }
    }
}
