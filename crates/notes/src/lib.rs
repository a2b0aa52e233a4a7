pub mod error;
pub mod manager;
pub mod metadata;
pub mod note;

pub use error::{NoteError, Result};
pub use manager::Manager;
pub use metadata::Metadata;
pub use note::Note;

pub use note_config::{Config, NotePaths};
pub use note_exec::{CommandEditor, Editor, EditorError};
