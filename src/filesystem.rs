//! # Filesystem Access Abstraction
//!
//! The resolution pipeline only touches the filesystem in three places:
//! reading configuration files, canonicalizing paths for include-cycle
//! identity, and expanding include globs. All three go through the
//! `FileSystem` trait so that tests can substitute an in-memory
//! implementation without patching global state.
//!
//! - **`OsFileSystem`**: the production implementation backed by `std::fs`
//!   and the `glob` crate.
//! - **`MemoryFileSystem`**: an in-memory implementation for tests, storing
//!   file contents in a sorted map and matching globs with `glob::Pattern`.

use crate::error::{Error, Result};
use glob::Pattern;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Trait for filesystem operations - allows substitution in tests.
pub trait FileSystem: Send + Sync {
    /// Read a configuration file into a UTF-8 string.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Canonicalize a path (absolute, symlinks resolved).
    ///
    /// Canonical paths are the identity used for include-cycle detection,
    /// so two spellings of the same file must canonicalize equal.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Expand a glob pattern into the sorted list of matching file paths.
    fn expand_glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Check whether a file exists.
    fn exists(&self, path: &Path) -> bool;
}

/// The default implementation of `FileSystem`, backed by the host
/// filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(Error::Io)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        std::fs::canonicalize(path).map_err(Error::Io)
    }

    fn expand_glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut matches = Vec::new();
        for entry in glob::glob(pattern).map_err(Error::Glob)? {
            match entry {
                Ok(path) => matches.push(path),
                Err(e) => return Err(Error::Io(e.into())),
            }
        }
        matches.sort();
        Ok(matches)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory filesystem for tests.
///
/// Stores file contents keyed by path. `canonicalize` is purely lexical
/// since there are no symlinks to resolve; it requires the file to exist,
/// matching the behavior of the real call.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFileSystem {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file with string content.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.files
            .insert(path.as_ref().to_path_buf(), content.to_string());
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the filesystem is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn not_found(path: &Path) -> Error {
        Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        ))
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        if self.files.contains_key(path) {
            Ok(path.to_path_buf())
        } else {
            Err(Self::not_found(path))
        }
    }

    fn expand_glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
        let mut matches = Vec::new();

        for path in self.files.keys() {
            if let Some(path_str) = path.to_str() {
                if pattern.matches(path_str) {
                    matches.push(path.clone());
                }
            }
        }

        Ok(matches)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
