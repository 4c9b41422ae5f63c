//! Filesystem collaborator
//!
//! The graph builder reads module sources and the compiler writes the bundle
//! exclusively through the [`FileSystem`] trait. [`NativeFileSystem`] goes to
//! disk; [`MemoryFileSystem`] keeps files in memory for tests and embedding.

use parking_lot::RwLock;
use path_clean::PathClean;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result type for filesystem operations
pub type FsResult<T> = Result<T, FsError>;

/// Errors that can occur during filesystem operations
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Text-only filesystem access used by a build.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Read a whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> FsResult<String>;

    /// Write `text` to `path`, replacing any existing content.
    ///
    /// Missing parent directories are not created.
    fn write_text(&self, path: &Path, text: &str) -> FsResult<()>;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileSystem;

impl FileSystem for NativeFileSystem {
    fn read_text(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FsError::FileNotFound(path.to_path_buf())
            } else {
                FsError::Io(format!("Failed to read {}: {}", path.display(), e))
            }
        })
    }

    fn write_text(&self, path: &Path, text: &str) -> FsResult<()> {
        std::fs::write(path, text)
            .map_err(|e| FsError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

/// In-memory [`FileSystem`]
///
/// Paths are cleaned before storage and lookup, so `/p/src/../src/a.js` and
/// `/p/src/a.js` name the same file. Relative paths resolve against `cwd`.
/// Clones share the same file table.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    files: Arc<RwLock<FxHashMap<PathBuf, String>>>,
    cwd: PathBuf,
}

impl MemoryFileSystem {
    /// Create an empty filesystem rooted at `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            files: Arc::new(RwLock::new(FxHashMap::default())),
            cwd: cwd.into(),
        }
    }

    /// Add (or replace) a file
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let key = self.normalize(path.as_ref());
        self.files.write().insert(key, content.into());
    }

    /// Builder-style [`add_file`](Self::add_file)
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Current content of a file, if present
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        let key = self.normalize(path.as_ref());
        self.files.read().get(&key).cloned()
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf().clean()
        } else {
            self.cwd.join(path).clean()
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_text(&self, path: &Path) -> FsResult<String> {
        let key = self.normalize(path);
        self.files
            .read()
            .get(&key)
            .cloned()
            .ok_or(FsError::FileNotFound(key))
    }

    fn write_text(&self, path: &Path, text: &str) -> FsResult<()> {
        let key = self.normalize(path);
        self.files.write().insert(key, text.to_string());
        Ok(())
    }
}
