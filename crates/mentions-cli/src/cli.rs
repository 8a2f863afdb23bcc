//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mentions - find the pages that mention a page by name
#[derive(Parser, Debug)]
#[command(
    name = "mentions",
    version,
    about = "Track bold **Page Title** mentions across a markdown corpus",
    after_help = CLI_AFTER_HELP
)]
pub struct Cli {
    /// Corpus root directory
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    pub root: PathBuf,

    /// Config file to use instead of <root>/mentions.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Log progress to stderr (same as RUST_LOG=debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Index the corpus and print page/mention counts
    Stats,
    /// Print the pages that mention any of the given titles
    Affected {
        /// Page titles, exactly as they appear inside **...**
        #[arg(required = true, value_name = "TITLE")]
        titles: Vec<String>,
    },
    /// Print the mentions found in a single file, without indexing the corpus
    Extract {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the mentions of one indexed page (path relative to the root)
    Page {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Index the corpus and print the sync summary
    Sync,
    /// Print the resolved corpus configuration
    Config,
}

const CLI_AFTER_HELP: &str = "\
EXAMPLES:
  mentions --root docs stats
  mentions --root docs affected \"Getting Started\" Install
  mentions extract docs/intro.md
  mentions --json --root docs page guide/usage.md

Set RUST_LOG=trace for per-mention logging.";
