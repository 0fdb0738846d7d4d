//! Navigation file output.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::OutlineError;

/// Write navigation text to `path`, replacing any existing file.
///
/// The old file is removed first and missing parent directories are
/// created. The file handle is closed before returning, on success or error.
///
/// # Errors
///
/// Returns [`OutlineError::Io`] if the old file cannot be removed or the new
/// one cannot be written.
pub fn write_navigation(path: &Path, content: &str) -> Result<(), OutlineError> {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed previous navigation file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(OutlineError::io(path)(e)),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(OutlineError::io(parent))?;
    }

    let file = File::create(path).map_err(OutlineError::io(path))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(OutlineError::io(path))?;
    writer.flush().map_err(OutlineError::io(path))?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote navigation file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.adoc");

        write_navigation(&path, "* a\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "* a\n");
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.adoc");
        fs::write(&path, "* old\n* longer old content\n").unwrap();

        write_navigation(&path, "* new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "* new\n");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modules/ROOT/nav.adoc");

        write_navigation(&path, "").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_navigation(dir.path(), "* a\n").unwrap_err();
        assert!(matches!(err, OutlineError::Io { .. }));
    }
}
