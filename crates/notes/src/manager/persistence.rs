//! Full-state save and load for [`Manager`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use note_config::Config;
use note_config::storage::{PRIVATE_FILE_MODE, to_json_pretty, write_with_mode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{NoteError, Result};
use crate::metadata::Metadata;
use crate::note::{Note, is_valid_filename};

use super::Manager;

#[derive(Serialize)]
struct IndexFileRef<'a> {
    notes: Vec<&'a Metadata>,
}

#[derive(Deserialize)]
struct IndexFile {
    // `null` and a missing key both mean "no notes".
    #[serde(default)]
    notes: Option<Vec<Metadata>>,
}

impl Manager {
    /// Flush everything: the note index, then every note's markdown file in
    /// list order, then the config.  Stops at the first failure; writes that
    /// already happened stay on disk.
    pub fn save(&self) -> Result<()> {
        let index_path = &self.paths.index_path;
        info!(path = %index_path.display(), notes = self.notes.len(), "saving note index");

        let index = IndexFileRef {
            notes: self.notes.iter().map(|note| &note.metadata).collect(),
        };
        let rendered = to_json_pretty(&index).map_err(|err| {
            error!(%err, "failed to serialize note index");
            NoteError::Serialize(err)
        })?;

        let io_err = |source: std::io::Error| {
            error!(path = %index_path.display(), %source, "failed to save note index");
            NoteError::io(index_path, source)
        };
        if let Some(parent) = index_path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        write_with_mode(index_path, &rendered, PRIVATE_FILE_MODE).map_err(io_err)?;

        for note in &self.notes {
            let path = self.config.note_path(&note.metadata.filename);
            write_note_file(&path, &note.content)?;
        }

        self.config.save_to(&self.paths.config_path)?;

        debug!("manager state saved");
        Ok(())
    }

    /// Replace the in-memory notes with the index on disk, reading each
    /// note's content from its markdown file, then reload the config.
    ///
    /// Entries with an invalid filename, and entries repeating an earlier
    /// filename in any letter case, are skipped.  Any unreadable note file
    /// aborts the load and leaves the current notes untouched.
    pub fn load(&mut self) -> Result<()> {
        let index_path = &self.paths.index_path;
        info!(path = %index_path.display(), "reading note index");

        let raw = fs::read_to_string(index_path).map_err(|source| {
            error!(path = %index_path.display(), %source, "failed to read note index");
            NoteError::io(index_path, source)
        })?;
        let index: IndexFile = serde_json::from_str(&raw).map_err(|source| {
            error!(path = %index_path.display(), %source, "failed to parse note index");
            NoteError::Parse {
                path: index_path.clone(),
                source,
            }
        })?;

        let entries = index.notes.unwrap_or_default();
        let mut seen = HashSet::with_capacity(entries.len());
        let mut notes = Vec::with_capacity(entries.len());
        for metadata in entries {
            if !is_valid_filename(&metadata.filename) {
                warn!(filename = %metadata.filename, "skipping invalid entry in note index");
                continue;
            }
            if !seen.insert(metadata.filename.to_lowercase()) {
                warn!(filename = %metadata.filename, "skipping duplicate entry in note index");
                continue;
            }

            let path = self.config.note_path(&metadata.filename);
            debug!(filename = %metadata.filename, path = %path.display(), "reading note file");
            let content = fs::read_to_string(&path).map_err(|source| {
                error!(filename = %metadata.filename, path = %path.display(), %source, "failed to read note file");
                NoteError::io(&path, source)
            })?;
            notes.push(Note { metadata, content });
        }

        info!(notes = notes.len(), "note index loaded");
        self.notes = notes;
        self.config = Config::load_from(&self.paths.config_path)?;
        Ok(())
    }
}

pub(super) fn write_note_file(path: &Path, content: &str) -> Result<()> {
    debug!(path = %path.display(), "writing note file");
    write_with_mode(path, content.as_bytes(), PRIVATE_FILE_MODE).map_err(|source| {
        error!(path = %path.display(), %source, "failed to write note file");
        NoteError::io(path, source)
    })
}
