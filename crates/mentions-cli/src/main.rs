// mentions: CLI frontend for mentions-core
// Argument parsing, corpus loading, text/JSON output

mod cli;
mod output;

use clap::Parser;
use cli::{Cli, CliCommand};
use mentions_core::{
    ConfigError, Corpus, CorpusConfig, CorpusError, SyncReport, extract_mentions_with_min_len,
};
use output::OutputHandler;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("page '{0}' is not in the corpus")]
    UnknownPage(String),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Resolve the corpus config: an explicit `--config` file must parse, the
/// implicit `<root>/mentions.toml` falls back to defaults.
fn resolve_config(cli: &Cli) -> Result<CorpusConfig, CliError> {
    match &cli.config {
        Some(path) => Ok(CorpusConfig::load_file(path)?),
        None => Ok(CorpusConfig::load(&cli.root)),
    }
}

/// Open and index the corpus named on the command line.
fn synced_corpus(cli: &Cli, config: CorpusConfig) -> Result<(Corpus, SyncReport), CliError> {
    let mut corpus = Corpus::open(&cli.root, config);
    let report = corpus.sync()?;
    log::info!("indexed {}: {}", cli.root.display(), report);
    Ok((corpus, report))
}

fn sorted(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut items: Vec<String> = items.into_iter().collect();
    items.sort();
    items
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let output = OutputHandler::new(cli.json);
    let config = resolve_config(cli)?;

    match &cli.command {
        CliCommand::Stats => {
            let (corpus, _) = synced_corpus(cli, config)?;
            output.emit_stats(&corpus.index().stats())?;
        }
        CliCommand::Affected { titles } => {
            let (corpus, _) = synced_corpus(cli, config)?;
            output.emit_list(&corpus.affected_by(titles))?;
        }
        CliCommand::Extract { file } => {
            let bytes = std::fs::read(file).map_err(|source| CliError::Read {
                path: file.clone(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes);
            let mentions = extract_mentions_with_min_len(&content, config.min_mention_len);
            output.emit_list(&sorted(mentions))?;
        }
        CliCommand::Page { path } => {
            let (corpus, _) = synced_corpus(cli, config)?;
            if !corpus.index().contains_page(path) {
                return Err(CliError::UnknownPage(path.clone()));
            }
            output.emit_list(&sorted(corpus.index().mentions_of(path)))?;
        }
        CliCommand::Sync => {
            let (_, report) = synced_corpus(cli, config)?;
            output.emit_report(&report)?;
        }
        CliCommand::Config => {
            output.emit_config(&config)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mentions: {}", e);
            ExitCode::FAILURE
        }
    }
}
