//! Abstraction over file system operations for testability

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Read-only file system access used by the extraction pipeline.
///
/// `read_dir` returns entries sorted by name so that directory traversal
/// order is deterministic for a given tree.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents, sorted by file name
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
}

/// FileSystem backed by std::fs
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        // Recipe files routinely contain stray non-UTF8 bytes, so a lossy
        // decode is the contract here rather than an error.
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("failed to list {}", path.display()))?
        {
            let entry = entry?;
            let file_type = if entry.file_type()?.is_dir() {
                FileType::Directory
            } else {
                FileType::File
            };
            entries.push(DirEntry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                file_type,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

pub use mock::MockFileSystem;

mod mock {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    /// In-memory file tree keyed by normalized paths. Parent directories are
    /// created implicitly by `add_file`.
    #[derive(Debug, Default)]
    pub struct MockFileSystem {
        files: Mutex<BTreeMap<PathBuf, String>>,
        dirs: Mutex<BTreeSet<PathBuf>>,
    }

    impl MockFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
            let path = path.as_ref().to_path_buf();
            let mut ancestor = path.parent();
            while let Some(dir) = ancestor {
                self.dirs.lock().unwrap().insert(dir.to_path_buf());
                ancestor = dir.parent();
            }
            self.files.lock().unwrap().insert(path, content.to_string());
        }

        pub fn add_dir(&self, path: impl AsRef<Path>) {
            let path = path.as_ref().to_path_buf();
            let mut ancestor = Some(path.as_path());
            while let Some(dir) = ancestor {
                self.dirs.lock().unwrap().insert(dir.to_path_buf());
                ancestor = dir.parent();
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.is_file(path) || self.is_dir(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.lock().unwrap().contains(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow!("no such file: {}", path.display()))
        }

        fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
            if !self.is_dir(path) {
                return Err(anyhow!("no such directory: {}", path.display()));
            }
            let mut entries = Vec::new();
            for file in self.files.lock().unwrap().keys() {
                if file.parent() == Some(path) {
                    entries.push(DirEntry {
                        path: file.clone(),
                        name: file.file_name().unwrap().to_string_lossy().into_owned(),
                        file_type: FileType::File,
                    });
                }
            }
            for dir in self.dirs.lock().unwrap().iter() {
                if dir.parent() == Some(path) {
                    entries.push(DirEntry {
                        path: dir.clone(),
                        name: dir.file_name().unwrap().to_string_lossy().into_owned(),
                        file_type: FileType::Directory,
                    });
                }
            }
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(entries)
        }
    }
}
