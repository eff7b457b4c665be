//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use dotfiles_topics::config::Config;
use dotfiles_topics::models::DiscoveryKind;
use tempfile::TempDir;

/// Builder for test configuration trees with a private cache directory
pub struct DotfilesBuilder {
    root: TempDir,
    cache: TempDir,
}

impl DotfilesBuilder {
    /// Create a new builder with an empty configuration root
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp root");
        let cache = TempDir::new().expect("Failed to create temp cache");
        Self { root, cache }
    }

    /// Add `<topic>/aliases.zsh` with the given content
    pub fn with_aliases(self, topic: &str, content: &str) -> Self {
        self.with_file(&format!("{}/aliases.zsh", topic), content)
    }

    /// Add `<topic>/shortcuts.zsh` with the given content
    pub fn with_shortcuts(self, topic: &str, content: &str) -> Self {
        self.with_file(&format!("{}/shortcuts.zsh", topic), content)
    }

    /// Add an arbitrary file relative to the configuration root
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        write_file(self.root.path(), rel, content);
        self
    }

    pub fn build(self) -> TestTree {
        TestTree { root: self.root, cache: self.cache }
    }
}

impl Default for DotfilesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built tree; the temp directories live as long as this value
pub struct TestTree {
    root: TempDir,
    cache: TempDir,
}

impl TestTree {
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn cache(&self) -> &Path {
        self.cache.path()
    }

    pub fn config(&self) -> Config {
        Config::new(self.root.path(), self.cache.path())
    }

    pub fn write(&self, rel: &str, content: &str) {
        write_file(self.root.path(), rel, content);
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.root.path().join(rel)).expect("Failed to remove file");
    }

    pub fn artifact(&self, kind: DiscoveryKind) -> PathBuf {
        self.config().cache_path(kind)
    }

    pub fn artifact_bytes(&self, kind: DiscoveryKind) -> Vec<u8> {
        fs::read(self.artifact(kind)).expect("Failed to read cache artifact")
    }

    /// Set a source file's mtime to `secs` after the artifact's mtime
    pub fn touch_after_artifact(&self, rel: &str, kind: DiscoveryKind, secs: u64) {
        let artifact_mtime = fs::metadata(self.artifact(kind))
            .and_then(|m| m.modified())
            .expect("Failed to read artifact mtime");
        set_mtime(&self.root.path().join(rel), artifact_mtime + Duration::from_secs(secs));
    }
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("path has parent")).expect("Failed to create dirs");
    fs::write(path, content).expect("Failed to write file");
}

pub fn set_mtime(path: &Path, mtime: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file")
        .set_modified(mtime)
        .expect("Failed to set mtime");
}

/// Tree with `bash` and `git` alias topics
pub fn bash_git_tree() -> TestTree {
    DotfilesBuilder::new()
        .with_aliases("bash", "# long listing\nalias ll='ls -l'\n")
        .with_aliases(
            "git",
            "# show status\nalias gs='git status'\ngcd() {\n  git checkout \"$1\"\n}\n",
        )
        .build()
}
