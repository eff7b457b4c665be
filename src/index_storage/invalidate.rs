use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::models::DiscoveryKind;

/// Delete the cache artifact for one kind, or for every kind when `kind` is None
///
/// Returns the paths that were actually removed. A missing artifact is not an
/// error; nothing is rebuilt here, the next query does that lazily.
pub fn invalidate(config: &Config, kind: Option<DiscoveryKind>) -> Result<Vec<PathBuf>> {
    let kinds: Vec<DiscoveryKind> = match kind {
        Some(kind) => vec![kind],
        None => DiscoveryKind::ALL.to_vec(),
    };

    let mut removed = Vec::new();
    for kind in kinds {
        let path = config.cache_path(kind);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {} cache {}", kind, path.display());
                removed.push(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()));
            }
        }
    }
    Ok(removed)
}
