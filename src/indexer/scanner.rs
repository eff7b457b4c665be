use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, FilterEntry, IntoIter, WalkDir};

/// Maximum directory depth to descend (security: prevent resource exhaustion)
const MAX_SCAN_DEPTH: usize = 32;

/// Physical identity of a directory, used to follow each symlink target once
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DirId {
    #[cfg(unix)]
    Inode { dev: u64, ino: u64 },
    #[cfg_attr(unix, allow(dead_code))]
    Canonical(PathBuf),
}

fn dir_id(entry: &DirEntry) -> Option<DirId> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        // With follow_links enabled this is the metadata of the link target
        let metadata = entry.metadata().ok()?;
        Some(DirId::Inode { dev: metadata.dev(), ino: metadata.ino() })
    }
    #[cfg(not(unix))]
    {
        entry.path().canonicalize().ok().map(DirId::Canonical)
    }
}

type VisitFilter = Box<dyn FnMut(&DirEntry) -> bool>;

/// Lazy walk over a configuration tree yielding every file named `reserved_name`
///
/// - Descends into hidden directories, to a depth of 32
/// - Follows symlinked directories, each physical target at most once
/// - Unreadable directories are logged and skipped
/// - A missing root yields nothing
pub struct TopicScanner {
    reserved_name: String,
    walker: Option<FilterEntry<IntoIter, VisitFilter>>,
}

impl TopicScanner {
    pub fn new(root: &Path, reserved_name: &str) -> Self {
        if !root.is_dir() {
            debug!("Scan root {} does not exist, nothing to discover", root.display());
            return Self { reserved_name: reserved_name.to_string(), walker: None };
        }

        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let mut visited: HashSet<DirId> = HashSet::new();
        let filter: VisitFilter = Box::new(move |entry: &DirEntry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            match dir_id(entry) {
                Some(id) => {
                    let first_visit = visited.insert(id);
                    if !first_visit {
                        debug!("Skipping already visited directory {}", entry.path().display());
                    }
                    first_visit
                }
                None => true,
            }
        });

        let walker = WalkDir::new(root)
            .follow_links(true)
            .max_depth(MAX_SCAN_DEPTH)
            .into_iter()
            .filter_entry(filter);

        Self { reserved_name: reserved_name.to_string(), walker: Some(walker) }
    }
}

impl Iterator for TopicScanner {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let walker = self.walker.as_mut()?;
        loop {
            match walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file()
                        && entry.file_name().to_str() == Some(self.reserved_name.as_str())
                    {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => {
                    let location =
                        e.path().map(|p| p.display().to_string()).unwrap_or_else(|| "?".into());
                    warn!("Skipping unreadable path {}: {}", location, e);
                }
            }
        }
    }
}

/// Convenience wrapper returning a [`TopicScanner`] for `root`
pub fn scan(root: &Path, reserved_name: &str) -> TopicScanner {
    TopicScanner::new(root, reserved_name)
}
