//! Persistent topic index storage
//!
//! One flat artifact per discovery kind at `<cache_root>/<kind>/topics.cache`,
//! holding `topic=relative/path` lines sorted by topic name. The cache is purely
//! an optimization: a missing, corrupt or unwritable artifact only forces a rebuild.
//!
//! Cache root: `$DOTFILES_CACHE_DIR`, else platform-specific cache directories
//! - macOS: `~/Library/Caches/dotfiles/`
//! - Linux: `~/.cache/dotfiles/`
//! - Windows: `%LOCALAPPDATA%\dotfiles\`

pub mod freshness;
pub mod invalidate;
pub mod persistence;

pub use freshness::{Assessment, Refresh, assess, fresh_index, is_fresh};
pub use invalidate::invalidate;
pub use persistence::{deserialize_topics, load_index, save_index, serialize_index};
