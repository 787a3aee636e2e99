//! Filesystem writer seam
//!
//! The write loop times exactly one [`FileWriter::write_file`] call per
//! file. The synchronous implementation creates the file, issues a single
//! `write(2)` for the whole payload, and closes it; a short write is an
//! error, never retried or continued.

use crate::error::FilesystemError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes one complete file per call
pub trait FileWriter {
    /// Create (or truncate) `path` and write `bytes` with one write call
    ///
    /// # Errors
    ///
    /// Returns `FilesystemError::Write` if the file cannot be created or the
    /// write fails, and `FilesystemError::ShortWrite` if fewer than
    /// `bytes.len()` bytes were accepted.
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> Result<(), FilesystemError>;
}

/// Plain `File::create` + one `write` + close
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncFileWriter;

impl SyncFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl FileWriter for SyncFileWriter {
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> Result<(), FilesystemError> {
        let mut file = File::create(path).map_err(|source| FilesystemError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        let written = file.write(bytes).map_err(|source| FilesystemError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        if written != bytes.len() {
            return Err(FilesystemError::ShortWrite {
                path: path.to_path_buf(),
                expected: bytes.len(),
                written,
            });
        }

        // File is closed on drop, inside the caller's timed region
        Ok(())
    }
}

impl<W: FileWriter + ?Sized> FileWriter for &mut W {
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> Result<(), FilesystemError> {
        (**self).write_file(path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sync_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("foo0.out");
        let data: Vec<u8> = (0..64u8).collect();

        SyncFileWriter::new().write_file(&path, &data).unwrap();
        assert_eq!(fs::read(&path).unwrap(), data);
    }

    #[test]
    fn test_sync_write_truncates_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("foo0.out");
        fs::write(&path, vec![0xFFu8; 128]).unwrap();

        SyncFileWriter::new().write_file(&path, &[1u8; 16]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1u8; 16]);
    }

    #[test]
    fn test_sync_write_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("foo0.out");

        let result = SyncFileWriter::new().write_file(&path, &[0u8; 8]);
        assert!(matches!(result, Err(FilesystemError::Write { .. })));
    }
}
