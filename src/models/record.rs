use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Alias,
    Function,
    /// A `bindkey` keyboard shortcut
    Binding,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Alias => "alias",
            RecordKind::Function => "function",
            RecordKind::Binding => "binding",
        }
    }
}

/// One alias, function or binding extracted from a topic's source file.
///
/// Records are never persisted; `topic` is a lookup key into the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub kind: RecordKind,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub topic: String,
}
