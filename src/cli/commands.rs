use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::error::QueryError;
use crate::index_storage::{Refresh, fresh_index, invalidate};
use crate::models::{DiscoveryKind, Record};
use crate::query::query;
use crate::utils::{format_path_with_tilde, sanitize_for_terminal};

#[derive(Parser)]
#[command(name = "dotfiles-topics")]
#[command(version = "0.1.0")]
#[command(
    about = "Discover aliases, functions and shortcuts across a modular dotfiles tree",
    long_about = None
)]
pub struct Cli {
    /// Configuration root to scan (overrides DOTFILES_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Cache directory (overrides DOTFILES_CACHE_DIR)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List records for every topic, or for a single topic
    Query {
        kind: DiscoveryKind,

        /// Only show this topic
        topic: Option<String>,

        /// Rebuild the topic index even if the cache is fresh
        #[arg(long)]
        refresh: bool,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List discovered topics and their source files
    Topics {
        kind: DiscoveryKind,

        /// Rebuild the topic index even if the cache is fresh
        #[arg(long)]
        refresh: bool,
    },

    /// Rebuild the topic index and report how many topics were found
    Refresh { kind: DiscoveryKind },

    /// Delete cached topic indexes (all kinds unless one is given)
    Invalidate { kind: Option<DiscoveryKind> },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests) keeps the existing subscriber
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .try_init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let config_root = match &cli.root {
        Some(root) => root.clone(),
        None => crate::utils::get_config_root()?,
    };
    let cache_root = match &cli.cache_dir {
        Some(dir) => dir.clone(),
        None => crate::utils::get_cache_root()?,
    };
    Ok(Config::new(config_root, cache_root))
}

fn refresh_mode(refresh: bool) -> Refresh {
    if refresh { Refresh::Force } else { Refresh::IfStale }
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = resolve_config(&cli)?;

    match &cli.command {
        Commands::Query { kind, topic, refresh, json } => {
            match query(&config, *kind, topic.as_deref(), refresh_mode(*refresh)) {
                Ok(records) => {
                    if *json {
                        print_json(&records)?;
                    } else {
                        print_records(&records, topic.is_none())?;
                    }
                }
                Err(err) => {
                    print_topic_usage(*kind, &err);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Topics { kind, refresh } => show_topics(&config, *kind, refresh_mode(*refresh))?,
        Commands::Refresh { kind } => {
            let index = fresh_index(&config, *kind, Refresh::Force);
            println!("Discovered {} topics", index.len());
        }
        Commands::Invalidate { kind } => {
            let removed = invalidate(&config, *kind)?;
            if removed.is_empty() {
                println!("No cache files to remove");
            }
            for path in removed {
                println!("Removed {}", format_path_with_tilde(&path));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json(records: &[Record]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize records")?;
    println!("{}", json);
    Ok(())
}

fn print_records(records: &[Record], group_by_topic: bool) -> Result<()> {
    let width = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let mut out = io::stdout().lock();
    let mut current_topic: Option<&str> = None;

    for record in records {
        if group_by_topic && current_topic != Some(record.topic.as_str()) {
            if current_topic.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "[{}]", record.topic)?;
            current_topic = Some(record.topic.as_str());
        }

        let name = sanitize_for_terminal(&record.name);
        let body = sanitize_for_terminal(&record.body);
        write!(out, "{:<8} {:<width$}  {}", record.kind.label(), name, body, width = width)?;
        if let Some(description) = &record.description {
            write!(out, "  # {}", sanitize_for_terminal(description))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_topic_usage(kind: DiscoveryKind, err: &QueryError) {
    let QueryError::TopicNotFound { requested, known } = err;
    eprintln!("error: unknown topic '{}'", requested);
    eprintln!();
    eprintln!("Usage: dotfiles-topics query {} [TOPIC]", kind);
    if known.is_empty() {
        eprintln!("No {} topics found", kind);
    } else {
        eprintln!("Known topics:");
        for name in known {
            eprintln!("  {}", name);
        }
    }
}

fn show_topics(config: &Config, kind: DiscoveryKind, refresh: Refresh) -> Result<()> {
    let index = fresh_index(config, kind, refresh);
    let width = index.topics().iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut out = io::stdout().lock();
    for topic in index.topics() {
        let path = config.config_root().join(&topic.source_path);
        writeln!(out, "{:<width$}  {}", topic.name, format_path_with_tilde(&path), width = width)?;
    }
    Ok(())
}
