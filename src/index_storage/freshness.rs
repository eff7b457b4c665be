//! Freshness oracle: decides whether a cached index still matches the tree
//!
//! A cached index is fresh when its artifact is at least as new as every
//! current source file and the scan finds exactly the cached topics. The scan
//! runs on every check because deleting a topic changes no remaining mtime.

use std::fs;
use std::time::SystemTime;

use tracing::{debug, info, warn};

use super::persistence::{load_index, save_index};
use crate::config::Config;
use crate::indexer::build_index;
use crate::models::{DiscoveryKind, TopicIndex};

/// Whether to consult the cache before rebuilding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refresh {
    #[default]
    IfStale,
    Force,
}

/// Result of comparing the cached artifact against a fresh scan
#[derive(Debug)]
pub struct Assessment {
    pub cached: Option<TopicIndex>,
    pub scanned: TopicIndex,
    pub newest_source: Option<SystemTime>,
    pub artifact_mtime: Option<SystemTime>,
}

impl Assessment {
    pub fn is_fresh(&self) -> bool {
        let (Some(cached), Some(artifact_mtime)) = (&self.cached, self.artifact_mtime) else {
            return false;
        };
        if !cached.same_topics(&self.scanned) {
            return false;
        }
        match self.newest_source {
            Some(newest) => newest <= artifact_mtime,
            None => true,
        }
    }
}

/// Newest modification time across the scanned topics' source files
fn newest_source_mtime(config: &Config, index: &TopicIndex) -> Option<SystemTime> {
    index
        .topics()
        .iter()
        .filter_map(|topic| {
            let path = config.config_root().join(&topic.source_path);
            match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(mtime) => Some(mtime),
                Err(e) => {
                    warn!("Failed to stat {}: {}", path.display(), e);
                    None
                }
            }
        })
        .max()
}

/// Scan the tree and compare it with the cached artifact for `kind`
pub fn assess(config: &Config, kind: DiscoveryKind) -> Assessment {
    let cached = load_index(config, kind);
    let artifact_mtime = cached
        .as_ref()
        .and_then(|_| fs::metadata(config.cache_path(kind)).and_then(|m| m.modified()).ok());
    let scanned = build_index(config, kind);
    let newest_source = newest_source_mtime(config, &scanned);

    Assessment { cached, scanned, newest_source, artifact_mtime }
}

/// Whether the cached index for `kind` can be served as-is
pub fn is_fresh(config: &Config, kind: DiscoveryKind) -> bool {
    assess(config, kind).is_fresh()
}

/// Return a valid index for `kind`, rebuilding and persisting it when needed
///
/// A failed cache write is logged and the freshly built index is still returned.
pub fn fresh_index(config: &Config, kind: DiscoveryKind, refresh: Refresh) -> TopicIndex {
    let index = match refresh {
        Refresh::Force => {
            let index = build_index(config, kind);
            info!("Rebuilt {} index: {} topics", kind, index.len());
            index
        }
        Refresh::IfStale => {
            let assessment = assess(config, kind);
            if assessment.is_fresh() {
                debug!("{} cache hit", kind);
                if let Some(cached) = assessment.cached {
                    return cached;
                }
            }
            debug!("{} cache miss, rebuilding", kind);
            assessment.scanned
        }
    };

    if let Err(e) = save_index(config, kind, &index) {
        warn!("Failed to write {} cache, continuing without it: {:#}", kind, e);
    }
    index
}
