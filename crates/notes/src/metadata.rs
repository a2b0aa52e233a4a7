use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the note index records about a note.
///
/// Serialized with camelCase keys (`filename`, `author`, `createdAt`,
/// `updatedAt`); timestamps are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Identity key.  Lowercase when created through the manager, and also the
    /// stem of the note's markdown file.
    pub filename: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed after every successful edit.
    pub updated_at: DateTime<Utc>,
}
