//! Explicit configuration injected into every component.
//!
//! Nothing in the library reads the environment on its own; callers resolve a
//! [`Config`] once (usually via [`Config::from_env`]) and pass it down, which
//! keeps tests isolated to their own temporary directories.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::models::DiscoveryKind;
use crate::utils::{get_cache_root, get_config_root};

const CACHE_FILENAME: &str = "topics.cache";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the modular configuration tree that gets scanned
    pub config_root: PathBuf,
    /// Directory holding one subdirectory per discovery kind
    pub cache_root: PathBuf,
}

impl Config {
    pub fn new(config_root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self { config_root: config_root.into(), cache_root: cache_root.into() }
    }

    /// Resolve both roots from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(get_config_root()?, get_cache_root()?))
    }

    /// `<cache_root>/<kind>/topics.cache`
    pub fn cache_path(&self, kind: DiscoveryKind) -> PathBuf {
        self.cache_dir(kind).join(CACHE_FILENAME)
    }

    pub fn cache_dir(&self, kind: DiscoveryKind) -> PathBuf {
        self.cache_root.join(kind.as_str())
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }
}
