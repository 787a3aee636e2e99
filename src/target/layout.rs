//! Directory layout of the output tree

use crate::config::WorkloadConfig;
use crate::error::FilesystemError;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of directory `index`: `d_` plus the index zero-padded to 6 digits
pub fn dir_name(index: u32) -> String {
    format!("d_{:06}", index)
}

/// Name of file `index` within a directory: `foo<index>.out`, unpadded
pub fn file_name(index: u32) -> String {
    format!("foo{}.out", index)
}

/// Output tree rooted at `<base>/<test_id>/rank_<rank>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    dir_count: u32,
    files_per_dir: u32,
}

impl OutputLayout {
    /// Layout relative to the working directory
    pub fn new(config: &WorkloadConfig) -> Self {
        Self {
            root: config.root_path(),
            dir_count: config.dir_count,
            files_per_dir: config.files_per_dir,
        }
    }

    /// Layout under an explicit base directory
    pub fn under(base: &Path, config: &WorkloadConfig) -> Self {
        Self {
            root: base.join(config.root_path()),
            ..Self::new(config)
        }
    }

    /// Root of this rank's subtree
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_count(&self) -> u32 {
        self.dir_count
    }

    pub fn files_per_dir(&self) -> u32 {
        self.files_per_dir
    }

    /// Path of directory `dir`
    pub fn dir_path(&self, dir: u32) -> PathBuf {
        self.root.join(dir_name(dir))
    }

    /// Path of file `file` in directory `dir`
    pub fn file_path(&self, dir: u32, file: u32) -> PathBuf {
        self.dir_path(dir).join(file_name(file))
    }

    /// All file paths in write order (directory-major)
    pub fn file_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (0..self.dir_count)
            .flat_map(move |d| (0..self.files_per_dir).map(move |f| self.file_path(d, f)))
    }

    /// Create every directory of the tree, tolerating ones that already exist
    pub fn create_tree(&self) -> Result<(), FilesystemError> {
        for dir in 0..self.dir_count {
            let path = self.dir_path(dir);
            fs::create_dir_all(&path)
                .map_err(|source| FilesystemError::CreateDir { path, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dirs: u32, files: u32) -> WorkloadConfig {
        WorkloadConfig {
            test_id: "t1".to_string(),
            rank: "0".to_string(),
            dir_count: dirs,
            files_per_dir: files,
            ..Default::default()
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(dir_name(0), "d_000000");
        assert_eq!(dir_name(42), "d_000042");
        assert_eq!(dir_name(1_234_567), "d_1234567");
        assert_eq!(file_name(0), "foo0.out");
        assert_eq!(file_name(10), "foo10.out");
    }

    #[test]
    fn test_paths() {
        let layout = OutputLayout::new(&config(1, 1));
        assert_eq!(layout.root(), Path::new("t1/rank_0"));
        assert_eq!(layout.file_path(3, 7), PathBuf::from("t1/rank_0/d_000003/foo7.out"));
    }

    #[test]
    fn test_file_paths_order() {
        let layout = OutputLayout::new(&config(3, 2));
        let paths: Vec<PathBuf> = layout.file_paths().collect();

        let expected: Vec<PathBuf> = [
            "d_000000/foo0.out",
            "d_000000/foo1.out",
            "d_000001/foo0.out",
            "d_000001/foo1.out",
            "d_000002/foo0.out",
            "d_000002/foo1.out",
        ]
        .iter()
        .map(|p| Path::new("t1/rank_0").join(p))
        .collect();

        assert_eq!(paths, expected);
    }

    #[test]
    fn test_create_tree() {
        let temp_dir = TempDir::new().unwrap();
        let layout = OutputLayout::under(temp_dir.path(), &config(3, 2));

        layout.create_tree().unwrap();
        for d in 0..3 {
            assert!(layout.dir_path(d).is_dir());
        }

        // Existing directories are fine
        assert!(layout.create_tree().is_ok());
    }

    #[test]
    fn test_create_tree_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the test_id directory should be
        fs::write(temp_dir.path().join("t1"), b"x").unwrap();

        let layout = OutputLayout::under(temp_dir.path(), &config(1, 1));
        assert!(matches!(
            layout.create_tree(),
            Err(FilesystemError::CreateDir { .. })
        ));
    }
}
