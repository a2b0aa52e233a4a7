//! CRUD over the note collection, kept in sync with the note index, each
//! note's markdown file, and the config file.
//!
//! Every mutating operation updates memory first and then flushes the whole
//! state with [`Manager::save`].  There is no rollback: if a write fails after
//! memory changed, the error is returned and the on-disk state may lag until
//! the next successful save.

use std::fs;
use std::path::{Path, PathBuf};

use note_config::storage::{PUBLIC_FILE_MODE, write_with_mode};
use note_config::{Config, NotePaths};
use tracing::{error, info};

use crate::error::{NoteError, Result};
use crate::note::Note;

mod editing;
mod persistence;

#[derive(Debug)]
pub struct Manager {
    /// Creation order.  At most one entry per filename.
    notes: Vec<Note>,
    config: Config,
    paths: NotePaths,
}

impl Manager {
    /// Open the note store at `paths`, creating the config file, the note
    /// index, and the notes directory on first run.
    ///
    /// Fails if any note listed in the index has no readable markdown file.
    pub fn bootstrap(paths: NotePaths) -> Result<Self> {
        let mut manager = Self {
            notes: Vec::new(),
            config: Config::with_directory(&paths.default_directory),
            paths,
        };

        if manager.paths.config_path.exists() {
            info!(path = %manager.paths.config_path.display(), "config file exists, loading it");
            manager.config = Config::load_from(&manager.paths.config_path)?;
        } else {
            info!(path = %manager.paths.config_path.display(), "config file does not exist, creating it");
            manager.config.save_to(&manager.paths.config_path)?;
        }

        if manager.paths.index_path.exists() {
            info!(path = %manager.paths.index_path.display(), "note index exists, loading it");
            manager.load()?;
        } else {
            info!(path = %manager.paths.index_path.display(), "note index does not exist, creating it");
            manager.save()?;
        }

        let notes_dir = manager.config.notes_dir();
        if !notes_dir.exists() {
            info!(path = %notes_dir.display(), "notes directory does not exist, creating it");
            fs::create_dir_all(&notes_dir).map_err(|source| {
                error!(path = %notes_dir.display(), %source, "failed to create notes directory");
                NoteError::io(&notes_dir, source)
            })?;
        }

        Ok(manager)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn paths(&self) -> &NotePaths {
        &self.paths
    }

    /// Create a note called `filename` (lowercased), write its markdown file,
    /// and save.
    pub fn create_note(&mut self, filename: &str) -> Result<()> {
        let filename = normalize(filename);
        info!(filename = %filename, "creating note");

        if self.position(&filename).is_some() {
            error!(filename = %filename, "duplicate note name");
            return Err(NoteError::DuplicateName(filename));
        }

        let note = Note::new(&self.config, &filename).inspect_err(|err| {
            error!(filename = %filename, %err, "failed to create note");
        })?;

        let path = self.config.note_path(&filename);
        persistence::write_note_file(&path, &note.content)?;

        self.notes.push(note);
        self.save()
    }

    /// Remove the note called `filename` (lowercased), delete its markdown
    /// file, and save.
    pub fn delete_note(&mut self, filename: &str) -> Result<()> {
        let filename = normalize(filename);
        info!(filename = %filename, "deleting note");

        let Some(index) = self.position(&filename) else {
            error!(filename = %filename, "note not found");
            return Err(NoteError::NotFound(filename));
        };

        self.notes.remove(index);

        let path = self.config.note_path(&filename);
        info!(path = %path.display(), "removing note file");
        fs::remove_file(&path).map_err(|source| {
            error!(path = %path.display(), %source, "failed to remove note file");
            NoteError::io(&path, source)
        })?;

        self.save()
    }

    /// Look up a note by name.  The query is lowercased, the same way
    /// [`Manager::create_note`] and [`Manager::delete_note`] treat it.
    pub fn get_note(&self, filename: &str) -> Option<&Note> {
        let filename = normalize(filename);
        self.position(&filename).map(|index| &self.notes[index])
    }

    /// All notes in creation order.
    pub fn get_notes(&self) -> &[Note] {
        &self.notes
    }

    /// Write the note's front-matter rendering to `{directory}/{filename}.md`
    /// and return the path written.
    pub fn publish_note(&self, filename: &str, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let note = self.get_note(filename).ok_or_else(|| {
            error!(filename = %filename, "note not found");
            NoteError::NotFound(normalize(filename))
        })?;

        let path = directory
            .as_ref()
            .join(format!("{}.md", note.metadata.filename));
        info!(filename = %note.metadata.filename, path = %path.display(), "publishing note");

        write_with_mode(&path, note.render_markdown().as_bytes(), PUBLIC_FILE_MODE).map_err(
            |source| {
                error!(path = %path.display(), %source, "failed to publish note");
                NoteError::io(&path, source)
            },
        )?;

        Ok(path)
    }

    fn position(&self, filename: &str) -> Option<usize> {
        self.notes
            .iter()
            .position(|note| note.metadata.filename == filename)
    }
}

fn normalize(filename: &str) -> String {
    filename.to_lowercase()
}
