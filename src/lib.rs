//! Dotfiles Topics - fast, always-fresh discovery of per-topic shell artifacts
//!
//! A modular configuration tree keeps one directory per topic (`git/`, `docker/`, ...),
//! each with reserved source files such as `aliases.zsh` or `shortcuts.zsh`. This
//! library answers "which topics exist and what do they define" without any
//! manual registration:
//!
//! - Scanning the tree for reserved source files and deriving topic names
//! - Caching the topic index per discovery kind with atomic writes
//! - Detecting stale caches from source mtimes and added/removed topics
//! - Extracting aliases, functions and key bindings with their comment descriptions
//!
//! # Example
//!
//! ```no_run
//! use dotfiles_topics::config::Config;
//! use dotfiles_topics::index_storage::Refresh;
//! use dotfiles_topics::models::DiscoveryKind;
//! use dotfiles_topics::query;
//!
//! let config = Config::new("/Users/alice/.dotfiles", "/Users/alice/.cache/dotfiles");
//! let records = query(&config, DiscoveryKind::Aliases, None, Refresh::IfStale)?;
//! println!("Found {} records", records.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod query;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::QueryError;
pub use indexer::build_index;
pub use models::{DiscoveryKind, Record, RecordKind, Topic, TopicIndex};
pub use query::query;
pub use utils::format_path_with_tilde;
