mod paths;
pub mod storage;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

pub use paths::{CONFIG_FILE_NAME, INDEX_FILE_NAME, NotePaths, expand_home, user_notes_directory};

/// Notes directory used only when no per-user data directory can be resolved.
pub const DEFAULT_DIRECTORY: &str = "~/.local/share/notes/entries";
pub const DEFAULT_EDITOR: &str = "vi";
pub const DEFAULT_AUTHOR: &str = "Anonymous";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("could not determine the current user's home directory")]
    HomeDirUnavailable,
}

/// User preferences, persisted as JSON.
///
/// ```json
/// {
///     "directory": "/home/alice/.local/share/notes/entries",
///     "editor": "vi",
///     "default_author": "Anonymous"
/// }
/// ```
///
/// Field order on disk follows declaration order.  Missing fields fall back
/// to their defaults when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where note markdown files live.  A leading `~` is expanded when the
    /// directory is resolved, see [`Config::notes_dir`].
    pub directory: String,
    /// Command used to open a note.  The first word is the program, any
    /// further words are passed before the file path.
    pub editor: String,
    /// Author stamped onto newly created notes.
    pub default_author: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            editor: DEFAULT_EDITOR.to_string(),
            default_author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

// Same place a first-run bootstrap points the config at, so a config file
// without a `directory` key does not silently move the notes.
fn default_directory() -> String {
    user_notes_directory()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| DEFAULT_DIRECTORY.to_string())
}

impl Config {
    /// Defaults, but with notes stored in `directory`.
    pub fn with_directory(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().display().to_string(),
            ..Self::default()
        }
    }

    /// Read and parse the config at `path`.  A missing file is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading config file");

        let raw = fs::read_to_string(path).map_err(|source| {
            error!(path = %path.display(), %source, "failed to read config file");
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config = serde_json::from_str(&raw).map_err(|source| {
            error!(path = %path.display(), %source, "failed to parse config file");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }

    /// Write the config to `path` with owner-only permissions, creating the
    /// parent directory if needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "saving config file");

        let rendered = storage::to_json_pretty(self).map_err(ConfigError::Serialize)?;

        let io_err = |source: io::Error| {
            error!(path = %path.display(), %source, "failed to save config file");
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        storage::write_with_mode(path, &rendered, storage::PRIVATE_FILE_MODE).map_err(io_err)?;

        debug!(path = %path.display(), "config file saved");
        Ok(())
    }

    /// The notes directory with `~` expanded.
    pub fn notes_dir(&self) -> PathBuf {
        expand_home(&self.directory)
    }

    /// Markdown file backing the note called `filename`.
    pub fn note_path(&self, filename: &str) -> PathBuf {
        self.notes_dir().join(format!("{filename}.md"))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
