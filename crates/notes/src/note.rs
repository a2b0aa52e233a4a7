use chrono::{SecondsFormat, Utc};
use note_config::Config;

use crate::error::{NoteError, Result};
use crate::metadata::Metadata;

/// A markdown document plus its metadata.
///
/// Only the metadata goes into the note index; `content` lives in the note's
/// own markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub metadata: Metadata,
    pub content: String,
}

impl Note {
    /// Build a fresh note called `filename`, authored by the config's default
    /// author and seeded with a `# Title` heading derived from the name.
    pub fn new(config: &Config, filename: &str) -> Result<Self> {
        if !is_valid_filename(filename) {
            return Err(NoteError::InvalidName(filename.to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            metadata: Metadata {
                filename: filename.to_string(),
                author: config.default_author.clone(),
                created_at: now,
                updated_at: now,
            },
            content: format!("# {}\n\n", title_from_filename(filename)),
        })
    }

    pub fn filename(&self) -> &str {
        &self.metadata.filename
    }

    /// Human-readable title derived from the filename.
    pub fn title(&self) -> String {
        title_from_filename(&self.metadata.filename)
    }

    /// Front matter followed by the raw content.
    ///
    /// ```text
    /// ---
    /// author: <author>
    /// createdAt: <RFC 3339>
    /// updatedAt: <RFC 3339>
    /// ---
    ///
    /// <content>
    /// ```
    pub fn render_markdown(&self) -> String {
        format!(
            "---\nauthor: {}\ncreatedAt: {}\nupdatedAt: {}\n---\n\n{}",
            self.metadata.author,
            self.metadata.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.metadata.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.content,
        )
    }

    /// HTML export is not supported; always empty.
    pub fn render_html(&self) -> String {
        String::new()
    }
}

/// Names may only use ASCII letters, digits, `-` and `_`.
pub fn is_valid_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// `weekly-report` → `Weekly Report`.
pub fn title_from_filename(filename: &str) -> String {
    filename
        .split('-')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(' ')
        .to_string()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
