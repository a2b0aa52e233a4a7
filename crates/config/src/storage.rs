//! Small file-writing helpers shared by the config and the note store.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

/// Owner read/write.
pub const PRIVATE_FILE_MODE: u32 = 0o600;
/// Owner read/write, world readable.
pub const PUBLIC_FILE_MODE: u32 = 0o644;

/// Pretty-print `value` as JSON indented with four spaces.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Create or truncate `path` and write `contents` to it.
///
/// `mode` only applies when the file is created, and only on Unix.
pub fn write_with_mode(path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pretty_json_uses_four_spaces() {
        let value = serde_json::json!({ "notes": [] });
        let out = String::from_utf8(to_json_pretty(&value).unwrap()).unwrap();
        assert_eq!(out, "{\n    \"notes\": []\n}");
    }

    #[test]
    fn write_truncates_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.md");
        write_with_mode(&path, b"a much longer first version", PRIVATE_FILE_MODE).unwrap();
        write_with_mode(&path, b"short", PRIVATE_FILE_MODE).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[cfg(unix)]
    #[test]
    fn write_applies_mode_on_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public.md");
        write_with_mode(&path, b"hello", PUBLIC_FILE_MODE).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
