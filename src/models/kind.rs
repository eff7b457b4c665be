use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Independent category of cached discovery.
///
/// Each kind has its own reserved source file name and its own cache artifact,
/// so freshness of one never affects the other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryKind {
    Aliases,
    Shortcuts,
}

impl DiscoveryKind {
    pub const ALL: [DiscoveryKind; 2] = [DiscoveryKind::Aliases, DiscoveryKind::Shortcuts];

    /// Base name of the per-topic source file for this kind
    pub fn reserved_name(self) -> &'static str {
        match self {
            DiscoveryKind::Aliases => "aliases.zsh",
            DiscoveryKind::Shortcuts => "shortcuts.zsh",
        }
    }

    /// Directory name under the cache root
    pub fn as_str(self) -> &'static str {
        match self {
            DiscoveryKind::Aliases => "aliases",
            DiscoveryKind::Shortcuts => "shortcuts",
        }
    }
}

impl fmt::Display for DiscoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aliases" => Ok(DiscoveryKind::Aliases),
            "shortcuts" => Ok(DiscoveryKind::Shortcuts),
            other => bail!("Unknown discovery kind: {}", other),
        }
    }
}
