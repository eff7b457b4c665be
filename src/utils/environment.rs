use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the configuration root
pub const ROOT_ENV: &str = "DOTFILES_ROOT";
/// Overrides the cache root
pub const CACHE_DIR_ENV: &str = "DOTFILES_CACHE_DIR";

const DEFAULT_ROOT_DIR: &str = ".dotfiles";
const CACHE_SUBDIR: &str = "dotfiles";

/// Resolve the configuration root: `$DOTFILES_ROOT`, else `~/.dotfiles`
pub fn get_config_root() -> Result<PathBuf> {
    if let Some(root) = non_empty_var(ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(DEFAULT_ROOT_DIR))
}

/// Resolve the cache root: `$DOTFILES_CACHE_DIR`, else the platform cache dir
pub fn get_cache_root() -> Result<PathBuf> {
    if let Some(dir) = non_empty_var(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(cache_base.join(CACHE_SUBDIR))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    // Both cases touch the same variables, so they run inside one test.
    #[test]
    fn test_config_root_resolution() {
        let original_root = env::var(ROOT_ENV).ok();
        let original_home = env::var("HOME").ok();

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. No other test reads these variables concurrently
        // 2. We restore the original values afterwards
        unsafe {
            env::set_var(ROOT_ENV, "/tmp/my-dotfiles");
        }
        assert_eq!(get_config_root().unwrap(), PathBuf::from("/tmp/my-dotfiles"));

        unsafe {
            env::remove_var(ROOT_ENV);
            env::set_var("HOME", "/Users/testuser");
        }
        assert_eq!(get_config_root().unwrap(), PathBuf::from("/Users/testuser/.dotfiles"));

        unsafe {
            match original_root {
                Some(root) => env::set_var(ROOT_ENV, root),
                None => env::remove_var(ROOT_ENV),
            }
            if let Some(home) = original_home {
                env::set_var("HOME", home);
            }
        }
    }

    #[test]
    fn test_cache_root_override() {
        let original = env::var(CACHE_DIR_ENV).ok();

        // SAFETY: see above; only this test touches DOTFILES_CACHE_DIR
        unsafe {
            env::set_var(CACHE_DIR_ENV, "/tmp/topic-cache");
        }
        assert_eq!(get_cache_root().unwrap(), PathBuf::from("/tmp/topic-cache"));

        unsafe {
            match original {
                Some(dir) => env::set_var(CACHE_DIR_ENV, dir),
                None => env::remove_var(CACHE_DIR_ENV),
            }
        }
    }
}
