//! Cache persistence: load/save with atomic writes

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::Config;
use crate::models::{DiscoveryKind, Topic, TopicIndex};
use crate::utils::validate_relative_path;

/// Serialize an index as `topic=relative/path` lines in index order
pub fn serialize_index(index: &TopicIndex) -> String {
    let mut out = String::new();
    for topic in index.topics() {
        out.push_str(&topic.name);
        out.push('=');
        out.push_str(&topic.source_path.to_string_lossy());
        out.push('\n');
    }
    out
}

/// Parse artifact content back into topics
///
/// # Errors
///
/// Returns an error if any line is malformed, a path escapes the configuration
/// root, or the last line is missing its newline terminator.
pub fn deserialize_topics(content: &str) -> Result<Vec<Topic>> {
    if !content.is_empty() && !content.ends_with('\n') {
        bail!("Cache artifact is not newline-terminated");
    }

    let mut topics = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let Some((name, path)) = line.split_once('=') else {
            bail!("Line {}: missing '=' separator", line_num + 1);
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            bail!("Line {}: invalid topic name {:?}", line_num + 1, name);
        }
        let source_path = PathBuf::from(path);
        validate_relative_path(&source_path)
            .with_context(|| format!("Line {}: invalid source path", line_num + 1))?;
        topics.push(Topic { name: name.to_string(), source_path });
    }
    Ok(topics)
}

fn read_index(path: &Path) -> Result<TopicIndex> {
    let content = fs::read_to_string(path).context("Failed to read cache artifact")?;
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .context("Failed to read cache artifact mtime")?;
    let topics = deserialize_topics(&content)?;
    Ok(TopicIndex::new(topics, DateTime::<Utc>::from(modified)))
}

/// Load the cached index for `kind`
///
/// Returns None if the artifact is missing, unreadable or corrupt (caller should rebuild).
/// `built_at` of the returned index is the artifact's modification time.
pub fn load_index(config: &Config, kind: DiscoveryKind) -> Option<TopicIndex> {
    let path = config.cache_path(kind);
    if !path.exists() {
        debug!("No {} cache at {}", kind, path.display());
        return None;
    }

    match read_index(&path) {
        Ok(index) => Some(index),
        Err(e) => {
            debug!("Ignoring unusable {} cache {}: {:#}", kind, path.display(), e);
            None
        }
    }
}

/// Save the index for `kind` atomically
///
/// Content goes to a uniquely named sibling temp file which is then renamed over
/// the artifact, so concurrent readers see either the old or the new file in full.
pub fn save_index(config: &Config, kind: DiscoveryKind, index: &TopicIndex) -> Result<PathBuf> {
    let cache_dir = config.cache_dir(kind);
    fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;

    let path = config.cache_path(kind);
    let mut temp = NamedTempFile::new_in(&cache_dir).context("Failed to create cache temp file")?;
    temp.write_all(serialize_index(index).as_bytes())
        .context("Failed to write cache temp file")?;
    temp.as_file().sync_all().context("Failed to flush cache temp file")?;
    temp.persist(&path).context("Failed to rename cache temp file")?;

    Ok(path)
}
