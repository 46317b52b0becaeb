use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Owns the output files of one conversion.
///
/// Files are created with create-new semantics, so an existing file is never
/// opened for writing. Until `commit` is called, dropping the guard removes
/// every file it created.
#[derive(Debug, Default)]
pub struct OutputGuard {
    created: Vec<PathBuf>,
    committed: bool,
}

impl OutputGuard {
    pub fn new() -> Self {
        OutputGuard::default()
    }

    /// Creates `path`, failing with `FileConflict` if it already exists.
    pub fn create(&mut self, path: &Path) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::FileConflict { path: path.to_path_buf() },
                _ => Error::io(path, e),
            })?;
        self.created.push(path.to_path_buf());
        Ok(BufWriter::new(file))
    }

    /// Keeps the created files on disk.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in &self.created {
            match std::fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "removed partial output"),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove partial output"),
            }
        }
    }
}

/// Fails with `FileConflict` on the first of `paths` that already exists.
pub fn ensure_absent(paths: &[&Path]) -> Result<()> {
    match paths.iter().find(|p| p.exists()) {
        Some(p) => Err(Error::FileConflict { path: p.to_path_buf() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_uncommitted_files_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.idx");
        {
            let mut guard = OutputGuard::new();
            let mut w = guard.create(&path).unwrap();
            w.write_all(b"partial").unwrap();
            w.flush().unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_committed_files_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.idx");
        let mut guard = OutputGuard::new();
        drop(guard.create(&path).unwrap());
        guard.commit();
        assert!(path.exists());
    }

    #[test]
    fn test_existing_file_is_conflict_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.idx");
        std::fs::write(&path, b"keep me").unwrap();
        {
            let mut guard = OutputGuard::new();
            assert!(matches!(guard.create(&path), Err(Error::FileConflict { .. })));
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }
}
