//! On-disk locations for the config file, the note index, and the default
//! notes directory.

use std::path::{Path, PathBuf};

use crate::ConfigError;

pub const CONFIG_FILE_NAME: &str = "note.json";
pub const INDEX_FILE_NAME: &str = "manager.json";
const ENTRIES_DIR_NAME: &str = "entries";

/// The three fixed locations a [`crate::Config`] and its notes live at.
///
/// Built once at process start and handed to the note manager; nothing in the
/// workspace keeps these in global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePaths {
    /// JSON file holding the user's [`crate::Config`].
    pub config_path: PathBuf,
    /// JSON file holding metadata for every note.
    pub index_path: PathBuf,
    /// Notes directory written into a freshly created config.
    pub default_directory: PathBuf,
}

impl NotePaths {
    /// Per-user layout:
    ///
    /// | File            | Location                              |
    /// |-----------------|---------------------------------------|
    /// | config          | `{config_dir}/note.json`              |
    /// | index           | `{data_dir}/notes/manager.json`       |
    /// | notes directory | `{data_dir}/notes/entries`            |
    pub fn for_current_user() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        let notes_root = user_notes_root().ok_or(ConfigError::HomeDirUnavailable)?;

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            index_path: notes_root.join(INDEX_FILE_NAME),
            default_directory: notes_root.join(ENTRIES_DIR_NAME),
        })
    }

    /// Everything under a single root directory.  Handy for portable setups
    /// and for tests.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_path: root.join(CONFIG_FILE_NAME),
            index_path: root.join(INDEX_FILE_NAME),
            default_directory: root.join(ENTRIES_DIR_NAME),
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = path.into();
        self
    }

    pub fn with_default_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_directory = path.into();
        self
    }
}

fn user_notes_root() -> Option<PathBuf> {
    dirs::data_dir().map(|data_dir| data_dir.join("notes"))
}

/// `{data_dir}/notes/entries`, the same directory
/// [`NotePaths::for_current_user`] writes into a first-run config.
pub fn user_notes_directory() -> Option<PathBuf> {
    user_notes_root().map(|root| root.join(ENTRIES_DIR_NAME))
}

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~`, and `~user` forms, are returned unchanged.
/// When no home directory can be resolved the raw path is returned as-is.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/") {
        rest
    } else {
        return PathBuf::from(raw);
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
