//! Query front end: topic index plus lazily parsed records
//!
//! Only the topic to path mapping is cached. Records are re-extracted from the
//! source files on every query, so an edited alias shows up immediately even
//! before the freshness check would rebuild the index.

use rayon::prelude::*;
use tracing::warn;

use crate::config::Config;
use crate::error::QueryError;
use crate::index_storage::{Refresh, fresh_index};
use crate::models::{DiscoveryKind, Record, Topic, TopicIndex};
use crate::parsers::parse_source_file;

/// Parse one topic's records, logging and returning nothing if the file is unusable
fn topic_records(config: &Config, topic: &Topic) -> Vec<Record> {
    let path = config.config_root().join(&topic.source_path);
    match parse_source_file(&path, &topic.name) {
        Ok(records) => records,
        Err(e) => {
            warn!("Skipping topic {}: {:#}", topic.name, e);
            Vec::new()
        }
    }
}

/// Records for an already resolved index, optionally restricted to one topic
///
/// # Errors
///
/// Returns [`QueryError::TopicNotFound`] if `topic_filter` names no topic in the index.
pub fn query_index(
    config: &Config,
    index: &TopicIndex,
    topic_filter: Option<&str>,
) -> Result<Vec<Record>, QueryError> {
    match topic_filter {
        Some(requested) => {
            let topic = index.get(&requested.to_lowercase()).ok_or_else(|| {
                QueryError::TopicNotFound { requested: requested.to_string(), known: index.names() }
            })?;
            Ok(topic_records(config, topic))
        }
        None => {
            // Indexed collect keeps topic order
            let per_topic: Vec<Vec<Record>> =
                index.topics().par_iter().map(|topic| topic_records(config, topic)).collect();
            Ok(per_topic.into_iter().flatten().collect())
        }
    }
}

/// All records for `kind`, or one topic's records when `topic_filter` is set
///
/// Records come back in topic-alphabetical order, then file order. Topic names
/// are matched case-insensitively since they are stored lower-case.
///
/// # Errors
///
/// Returns [`QueryError::TopicNotFound`] if `topic_filter` names no discovered topic.
///
/// # Examples
///
/// ```no_run
/// use dotfiles_topics::config::Config;
/// use dotfiles_topics::index_storage::Refresh;
/// use dotfiles_topics::models::DiscoveryKind;
/// use dotfiles_topics::query::query;
///
/// let config = Config::from_env()?;
/// for record in query(&config, DiscoveryKind::Aliases, Some("git"), Refresh::IfStale)? {
///     println!("{} = {}", record.name, record.body);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn query(
    config: &Config,
    kind: DiscoveryKind,
    topic_filter: Option<&str>,
    refresh: Refresh,
) -> Result<Vec<Record>, QueryError> {
    let index = fresh_index(config, kind, refresh);
    query_index(config, &index, topic_filter)
}
