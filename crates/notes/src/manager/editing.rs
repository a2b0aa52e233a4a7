//! Interactive editing of notes and of the config file through an [`Editor`].

use std::fs;
use std::path::Path;

use chrono::Utc;
use note_config::Config;
use note_exec::{CommandEditor, Editor, EditorError};
use tracing::{error, info, warn};

use crate::error::{NoteError, Result};

use super::{Manager, normalize};

impl Manager {
    /// Open the note in the configured editor, then pick up whatever the
    /// editor left in the file, bump `updated_at`, and save.
    pub fn open_note(&mut self, filename: &str) -> Result<()> {
        let editor = ConfiguredEditor(self.config.editor.clone());
        self.open_note_with(filename, &editor)
    }

    /// [`Manager::open_note`] with an explicit editor.
    ///
    /// The file content is taken as-is, front matter included.  If the editor
    /// fails, the note is left exactly as it was and nothing is saved.
    pub fn open_note_with(&mut self, filename: &str, editor: &dyn Editor) -> Result<()> {
        let filename = normalize(filename);
        info!(filename = %filename, "opening note");

        let Some(index) = self.position(&filename) else {
            error!(filename = %filename, "note not found");
            return Err(NoteError::NotFound(filename));
        };

        let path = self.config.note_path(&filename);
        editor.edit(&path).inspect_err(|err| {
            error!(filename = %filename, %err, "failed to open note in editor");
        })?;

        info!(filename = %filename, "note edited, updating metadata");
        let content = fs::read_to_string(&path).map_err(|source| {
            error!(path = %path.display(), %source, "failed to read note file");
            NoteError::io(&path, source)
        })?;

        let note = &mut self.notes[index];
        note.content = content;
        note.metadata.updated_at = Utc::now();

        self.save()
    }

    /// Open the config file itself in the configured editor and reload it.
    pub fn open_config(&mut self) -> Result<()> {
        let editor = ConfiguredEditor(self.config.editor.clone());
        self.open_config_with(&editor)
    }

    /// [`Manager::open_config`] with an explicit editor.
    ///
    /// If the edited file no longer parses, the previous config is written
    /// back and the parse error is returned.
    pub fn open_config_with(&mut self, editor: &dyn Editor) -> Result<()> {
        let path = self.paths.config_path.clone();
        info!(path = %path.display(), "opening config file");

        if !path.exists() {
            error!(path = %path.display(), "config file does not exist");
            return Err(NoteError::ConfigMissing(path));
        }

        let previous = self.config.clone();
        editor.edit(&path).inspect_err(|err| {
            error!(path = %path.display(), %err, "failed to open config file in editor");
        })?;

        info!(path = %path.display(), "config edited, validating");
        match Config::load_from(&path) {
            Ok(config) => {
                self.config = config;
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "edited config is invalid, restoring previous config");
                self.config = previous;
                if let Err(restore_err) = self.config.save_to(&path) {
                    error!(path = %path.display(), %restore_err, "failed to restore previous config");
                }
                Err(err.into())
            }
        }
    }
}

/// The `config.editor` command, parsed only when an edit actually happens so
/// a missing note is reported ahead of a bad command.
struct ConfiguredEditor(String);

impl Editor for ConfiguredEditor {
    fn edit(&self, path: &Path) -> Result<(), EditorError> {
        CommandEditor::parse(&self.0)?.edit(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io;

    use note_config::NotePaths;
    use tempfile::TempDir;

    fn bootstrap(dir: &TempDir) -> Manager {
        Manager::bootstrap(NotePaths::rooted_at(dir.path())).unwrap()
    }

    fn failing_editor(_: &Path) -> Result<(), EditorError> {
        Err(EditorError::Spawn {
            command: "broken".to_string(),
            source: io::Error::other("boom"),
        })
    }

    // ── open_note ──────────────────────────────────────────────────────────

    #[test]
    fn open_missing_note_never_launches_editor() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        let launched = Cell::new(false);
        let editor = |_: &Path| {
            launched.set(true);
            Ok::<(), EditorError>(())
        };

        let err = manager.open_note_with("ghost", &editor).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(ref name) if name == "ghost"));
        assert!(!launched.get());
    }

    #[test]
    fn open_missing_note_with_configured_editor_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        manager.config.editor = String::new();

        let err = manager.open_note("ghost").unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn open_note_rereads_content_and_bumps_updated_at() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        manager.create_note("journal").unwrap();
        let before = manager.get_note("journal").unwrap().metadata.clone();

        let editor = |path: &Path| {
            fs::write(path, "---\ntitle: typed by hand\n---\nDear diary\n").unwrap();
            Ok::<(), EditorError>(())
        };
        manager.open_note_with("Journal", &editor).unwrap();

        let note = manager.get_note("journal").unwrap();
        assert_eq!(note.content, "---\ntitle: typed by hand\n---\nDear diary\n");
        assert_eq!(note.metadata.created_at, before.created_at);
        assert_eq!(note.metadata.author, before.author);
        assert!(note.metadata.updated_at >= before.updated_at);

        let reloaded = bootstrap(&dir);
        assert_eq!(reloaded.get_note("journal").unwrap(), note);
    }

    #[test]
    fn failed_editor_leaves_note_untouched() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        manager.create_note("stable").unwrap();
        let before = manager.get_note("stable").unwrap().clone();
        let index_before = fs::read_to_string(dir.path().join("manager.json")).unwrap();

        let err = manager.open_note_with("stable", &failing_editor).unwrap_err();
        assert!(matches!(err, NoteError::Editor(_)), "got {err:?}");
        assert_eq!(manager.get_note("stable").unwrap(), &before);
        assert_eq!(
            fs::read_to_string(dir.path().join("manager.json")).unwrap(),
            index_before
        );
    }

    #[test]
    fn blank_editor_command_is_editor_error() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        manager.create_note("x").unwrap();
        manager.config.editor = "   ".to_string();

        let err = manager.open_note("x").unwrap_err();
        assert!(matches!(err, NoteError::Editor(EditorError::EmptyCommand)), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_from_real_editor_is_editor_error() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        manager.create_note("x").unwrap();
        manager.config.editor = "false".to_string();

        let err = manager.open_note("x").unwrap_err();
        assert!(
            matches!(err, NoteError::Editor(EditorError::Failed { .. })),
            "got {err:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn real_editor_changes_are_persisted() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("append.sh");
        fs::write(&script, "printf 'more\\n' >> \"$1\"\n").unwrap();

        let mut manager = bootstrap(&dir);
        manager.create_note("log").unwrap();
        manager.config.editor = format!("sh {}", script.display());

        manager.open_note("log").unwrap();
        assert_eq!(manager.get_note("log").unwrap().content, "# Log\n\nmore\n");
    }

    // ── open_config ────────────────────────────────────────────────────────

    #[test]
    fn open_config_picks_up_valid_edit() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);

        let editor = |path: &Path| {
            let mut config = Config::load_from(path).unwrap();
            config.default_author = "Edited".to_string();
            config.save_to(path).unwrap();
            Ok::<(), EditorError>(())
        };
        manager.open_config_with(&editor).unwrap();

        assert_eq!(manager.config().default_author, "Edited");
        manager.create_note("signed").unwrap();
        assert_eq!(manager.get_note("signed").unwrap().metadata.author, "Edited");
    }

    #[test]
    fn open_config_restores_previous_on_invalid_edit() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        let previous = manager.config().clone();

        let editor = |path: &Path| {
            fs::write(path, "{ broken").unwrap();
            Ok::<(), EditorError>(())
        };
        let err = manager.open_config_with(&editor).unwrap_err();

        assert!(matches!(err, NoteError::Config(_)), "got {err:?}");
        assert_eq!(manager.config(), &previous);
        assert_eq!(
            Config::load_from(dir.path().join("note.json")).unwrap(),
            previous
        );
    }

    #[test]
    fn open_config_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        fs::remove_file(dir.path().join("note.json")).unwrap();

        let launched = Cell::new(false);
        let editor = |_: &Path| {
            launched.set(true);
            Ok::<(), EditorError>(())
        };
        let err = manager.open_config_with(&editor).unwrap_err();
        assert!(matches!(err, NoteError::ConfigMissing(_)), "got {err:?}");
        assert!(!launched.get());
    }

    #[test]
    fn open_config_editor_failure_keeps_config() {
        let dir = TempDir::new().unwrap();
        let mut manager = bootstrap(&dir);
        let previous = manager.config().clone();

        let err = manager.open_config_with(&failing_editor).unwrap_err();
        assert!(matches!(err, NoteError::Editor(_)), "got {err:?}");
        assert_eq!(manager.config(), &previous);
    }
}
