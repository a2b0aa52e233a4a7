use std::io;
use std::path::PathBuf;

use note_config::ConfigError;
use note_exec::EditorError;
use thiserror::Error;

pub type Result<T, E = NoteError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid name '{0}'")]
    InvalidName(String),
    #[error("duplicate note name '{0}'")]
    DuplicateName(String),
    #[error("note with name '{0}' not found")]
    NotFound(String),
    #[error("config file {} does not exist", .0.display())]
    ConfigMissing(PathBuf),
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize note index: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl NoteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
