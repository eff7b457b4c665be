//! Topic index builder.
//!
//! Maps each discovered source file to a topic named after its parent directory,
//! e.g. `<root>/git/aliases.zsh` becomes topic `git`. Paths that cannot be
//! expressed relative to the root, or whose parent has no usable name, are
//! skipped with a warning.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::indexer::scanner::scan;
use crate::models::{DiscoveryKind, Topic, TopicIndex};
use crate::utils::relative_to_root;

/// Derive the topic for one source file, relative to `root`
pub fn topic_from_path(path: &Path, root: &Path) -> Option<Topic> {
    let name = path.parent()?.file_name()?.to_str()?.to_lowercase();
    if name.is_empty() || name.contains('=') || name.contains(char::is_whitespace) {
        warn!("Skipping {}: parent directory is not a usable topic name", path.display());
        return None;
    }

    let source_path = match relative_to_root(path, root) {
        Ok(source_path) => source_path,
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };
    // The cache stores UTF-8 text; a lossy path would never compare equal on reload
    if source_path.to_str().is_none() {
        warn!("Skipping {}: path is not valid UTF-8", path.display());
        return None;
    }

    Some(Topic { name, source_path })
}

/// Build a sorted, deduplicated index from any sequence of source paths
///
/// Duplicate topic names resolve to the path seen last.
pub fn build_from_paths<I>(paths: I, root: &Path) -> TopicIndex
where
    I: IntoIterator<Item = PathBuf>,
{
    let topics: Vec<Topic> =
        paths.into_iter().filter_map(|path| topic_from_path(&path, root)).collect();
    TopicIndex::new(topics, Utc::now())
}

/// Scan the configuration root and build the topic index for `kind`
///
/// Never fails: a missing root or unreadable subtrees simply produce fewer topics.
///
/// # Examples
///
/// ```no_run
/// use dotfiles_topics::config::Config;
/// use dotfiles_topics::indexer::build_index;
/// use dotfiles_topics::models::DiscoveryKind;
///
/// let config = Config::new("/Users/alice/.dotfiles", "/Users/alice/.cache/dotfiles");
/// let index = build_index(&config, DiscoveryKind::Aliases);
/// println!("Discovered {} topics", index.len());
/// ```
pub fn build_index(config: &Config, kind: DiscoveryKind) -> TopicIndex {
    let root = std::path::absolute(config.config_root())
        .unwrap_or_else(|_| config.config_root().to_path_buf());
    let index = build_from_paths(scan(&root, kind.reserved_name()), &root);
    debug!("Built {} index with {} topics", kind, index.len());
    index
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_topic_from_path_uses_parent_dir() {
        let topic =
            topic_from_path(Path::new("/cfg/tools/Git/aliases.zsh"), Path::new("/cfg")).unwrap();
        assert_eq!(topic.name, "git");
        assert_eq!(topic.source_path, PathBuf::from("tools/Git/aliases.zsh"));
    }

    #[test]
    fn test_topic_from_path_rejects_unsafe_names() {
        assert!(topic_from_path(Path::new("/cfg/a=b/aliases.zsh"), Path::new("/cfg")).is_none());
        assert!(topic_from_path(Path::new("/cfg/my dir/aliases.zsh"), Path::new("/cfg")).is_none());
    }

    #[test]
    fn test_topic_from_path_outside_root() {
        assert!(topic_from_path(Path::new("/other/git/aliases.zsh"), Path::new("/cfg")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_topic_from_path_rejects_non_utf8_ancestor() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path =
            Path::new("/cfg").join(OsStr::from_bytes(b"tools\xff")).join("git/aliases.zsh");
        assert!(topic_from_path(&path, Path::new("/cfg")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_tree_stays_fresh_after_rebuild() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        use crate::index_storage::{Refresh, fresh_index, is_fresh};

        let root = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        let odd = root.path().join(OsStr::from_bytes(b"tools\xff")).join("git");
        if fs::create_dir_all(&odd).is_err() {
            // Filesystem refuses non-UTF-8 names
            return;
        }
        fs::write(odd.join("aliases.zsh"), "alias gs='git status'\n").unwrap();
        fs::create_dir_all(root.path().join("bash")).unwrap();
        fs::write(root.path().join("bash/aliases.zsh"), "alias ll='ls -l'\n").unwrap();

        let config = Config::new(root.path(), cache.path());
        let index = fresh_index(&config, DiscoveryKind::Aliases, Refresh::Force);

        assert_eq!(index.names(), vec!["bash"]);
        assert!(is_fresh(&config, DiscoveryKind::Aliases));
    }

    #[test]
    fn test_build_from_synthetic_paths() {
        let root = Path::new("/cfg");
        let index = build_from_paths(
            vec![
                PathBuf::from("/cfg/zsh/aliases.zsh"),
                PathBuf::from("/cfg/git/aliases.zsh"),
                PathBuf::from("/cfg/bash/aliases.zsh"),
            ],
            root,
        );
        assert_eq!(index.names(), vec!["bash", "git", "zsh"]);
    }

    #[test]
    fn test_build_from_paths_duplicate_picks_a_valid_path() {
        let root = Path::new("/cfg");
        let candidates =
            [PathBuf::from("/cfg/a/git/aliases.zsh"), PathBuf::from("/cfg/b/git/aliases.zsh")];
        let index = build_from_paths(candidates.clone(), root);

        assert_eq!(index.len(), 1);
        let chosen = root.join(&index.get("git").unwrap().source_path);
        assert!(candidates.contains(&chosen));
    }

    #[test]
    fn test_build_index_from_tree() {
        let root = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        for topic in ["git", "bash"] {
            fs::create_dir_all(root.path().join(topic)).unwrap();
            fs::write(root.path().join(topic).join("aliases.zsh"), "").unwrap();
        }
        fs::create_dir_all(root.path().join("tmux")).unwrap();
        fs::write(root.path().join("tmux/shortcuts.zsh"), "").unwrap();

        let config = Config::new(root.path(), cache.path());
        assert_eq!(build_index(&config, DiscoveryKind::Aliases).names(), vec!["bash", "git"]);
        assert_eq!(build_index(&config, DiscoveryKind::Shortcuts).names(), vec!["tmux"]);
    }
}
