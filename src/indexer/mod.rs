//! Topic discovery over the configuration tree
//!
//! # Error Handling Strategy
//!
//! Discovery degrades instead of failing:
//!
//! - **Missing root**: yields an empty index, not an error.
//! - **Unreadable subdirectories**: logged as warnings; the rest of the tree is still scanned.
//! - **Unusable paths**: files whose parent directory is not a valid topic name are skipped.
//!
//! The only cost of a degraded scan is fewer topics; queries against the index still succeed.

pub mod builder;
pub mod scanner;

pub use builder::{build_from_paths, build_index, topic_from_path};
pub use scanner::{TopicScanner, scan};
