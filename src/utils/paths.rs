use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};

// Source files are small hand-written shell snippets: 1MB is generous
const MAX_SOURCE_FILE_BYTES: u64 = 1024 * 1024;

/// Express `path` relative to `root`, as stored in the cache artifact
///
/// # Errors
///
/// Returns an error if `path` does not live under `root`.
pub fn relative_to_root(path: &Path, root: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .with_context(|| format!("{} is not under {}", path.display(), root.display()))
}

/// Validates a relative path read back from a cache artifact
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty or absolute
/// - The path contains '..' components (path traversal)
pub fn validate_relative_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("Path is empty");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => bail!("Path contains '..' component: {}", path.display()),
            Component::RootDir | Component::Prefix(_) => {
                bail!("Path must be relative: {}", path.display())
            }
        }
    }
    Ok(())
}

/// Validates that a source file's size is within acceptable limits (1MB)
///
/// Takes an open file handle so the check applies to the file actually read.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the file is too large.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_SOURCE_FILE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_SOURCE_FILE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use dotfiles_topics::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/.dotfiles/git/aliases.zsh");
/// // Returns "~/.dotfiles/git/aliases.zsh" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_relative_to_root() {
        let rel = relative_to_root(
            Path::new("/home/u/.dotfiles/git/aliases.zsh"),
            Path::new("/home/u/.dotfiles"),
        )
        .unwrap();
        assert_eq!(rel, PathBuf::from("git/aliases.zsh"));
    }

    #[test]
    fn test_relative_to_root_outside() {
        let root = Path::new("/home/u/.dotfiles");
        assert!(relative_to_root(Path::new("/etc/passwd"), root).is_err());
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path(Path::new("git/aliases.zsh")).is_ok());
        assert!(validate_relative_path(Path::new("../etc/aliases.zsh")).is_err());
        assert!(validate_relative_path(Path::new("/etc/aliases.zsh")).is_err());
        assert!(validate_relative_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_file_size_small_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"alias ll='ls -l'\n").unwrap();
        assert!(validate_file_size(file.as_file(), file.path()).is_ok());
    }

    #[test]
    fn test_validate_file_size_too_large() {
        let file = NamedTempFile::new().unwrap();
        file.as_file().set_len(MAX_SOURCE_FILE_BYTES + 1).unwrap();
        let err = validate_file_size(file.as_file(), file.path()).unwrap_err();
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_format_path_with_tilde() {
        let path = PathBuf::from("/Users/testuser/.dotfiles/git");
        let formatted = format_path_with_tilde_internal(&path, Some("/Users/testuser"));
        assert_eq!(formatted, "~/.dotfiles/git");

        let path2 = PathBuf::from("/opt/local/bin");
        let formatted2 = format_path_with_tilde_internal(&path2, Some("/Users/testuser"));
        assert_eq!(formatted2, "/opt/local/bin");
    }
}
