//! Data models for topic discovery.
//!
//! - [`DiscoveryKind`] - Independent discovery category (aliases, shortcuts)
//! - [`Topic`] / [`TopicIndex`] - Discovered topic directories, the cached part
//! - [`Record`] - Parsed alias/function/binding, re-derived on every query

pub mod kind;
pub mod record;
pub mod topic;

pub use kind::DiscoveryKind;
pub use record::{Record, RecordKind};
pub use topic::{Topic, TopicIndex};
