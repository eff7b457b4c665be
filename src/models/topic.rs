use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A named grouping of shell artifacts, one per topic directory.
///
/// `source_path` is relative to the configuration root, which is the form the
/// cache artifact stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic {
    pub name: String,
    pub source_path: PathBuf,
}

/// Sorted, deduplicated set of topics for one discovery kind.
///
/// Rebuilt in full on every cache miss and never mutated afterwards; each
/// caller owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicIndex {
    topics: Vec<Topic>,
    pub built_at: DateTime<Utc>,
}

impl TopicIndex {
    /// Create an index, sorting topics by name and keeping the last entry for
    /// any duplicated name
    pub fn new(topics: Vec<Topic>, built_at: DateTime<Utc>) -> Self {
        let mut topics = topics;
        // Stable sort keeps scan order among equal names, so the last one wins below
        topics.sort_by(|a, b| a.name.cmp(&b.name));

        let mut deduped: Vec<Topic> = Vec::with_capacity(topics.len());
        for topic in topics {
            match deduped.last_mut() {
                Some(last) if last.name == topic.name => *last = topic,
                _ => deduped.push(topic),
            }
        }

        Self { topics: deduped, built_at }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Topic> {
        self.topics.binary_search_by(|t| t.name.as_str().cmp(name)).ok().map(|i| &self.topics[i])
    }

    pub fn names(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.name.clone()).collect()
    }

    /// Whether both indexes name the same topics at the same paths
    pub fn same_topics(&self, other: &TopicIndex) -> bool {
        self.topics == other.topics
    }
}
