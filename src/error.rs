use thiserror::Error;

/// Errors surfaced to callers of [`crate::query::query`]
///
/// Discovery and caching problems never appear here; they degrade to a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown topic '{requested}' (known topics: {})", .known.join(", "))]
    TopicNotFound { requested: String, known: Vec<String> },
}
