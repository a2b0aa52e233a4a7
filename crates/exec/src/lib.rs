//! Launching the user's editor against a file.
//!
//! The editor is an opaque external program invoked as
//! `<program> [args...] <path>` with the caller's stdin/stdout/stderr attached,
//! so it owns the terminal until it exits.  The call blocks until then.

pub mod editor;

pub use editor::{CommandEditor, Editor, EditorError};
