//! # Resolution Pipeline
//!
//! Ties the stages together: load each config file, expand shorthand,
//! resolve includes, merge the resulting documents, validate into
//! descriptors, and order them for the executor.
//!
//! The resolver owns its filesystem and environment handles so the whole
//! pipeline can run against in-memory fakes in tests.

use crate::environment::{Environment, SystemEnvironment};
use crate::error::Result;
use crate::expand;
use crate::extract;
use crate::filesystem::{FileSystem, OsFileSystem};
use crate::include;
use crate::loader::Loader;
use crate::merge;
use crate::merge::MergeConflict;
use crate::validator::{RepositoryDescriptor, ValidationError, Validator};
use std::path::PathBuf;

/// The complete result of one resolution run.
///
/// Fatal problems (unreadable files, malformed syntax, include cycles)
/// surface as `Err` from [`Resolver::resolve`] instead; a `Resolution` is
/// only produced once every document loaded.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Valid descriptors, ordered by parent directory then name.
    pub repositories: Vec<RepositoryDescriptor>,
    /// Per-record validation failures, exhaustively collected.
    pub errors: Vec<ValidationError>,
    /// Duplicate keys that were resolved by last-write-wins.
    pub conflicts: Vec<MergeConflict>,
}

impl Resolution {
    /// True when every record validated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the load/expand/include/merge/validate/extract pipeline.
pub struct Resolver {
    fs: Box<dyn FileSystem>,
    env: Box<dyn Environment>,
    max_include_depth: usize,
}

impl Resolver {
    /// A resolver backed by the real filesystem and process environment.
    pub fn new() -> Self {
        Self::with_parts(Box::new(OsFileSystem), Box::new(SystemEnvironment))
    }

    /// A resolver with injected filesystem and environment, for tests and
    /// embedding.
    pub fn with_parts(fs: Box<dyn FileSystem>, env: Box<dyn Environment>) -> Self {
        Self {
            fs,
            env,
            max_include_depth: include::DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Override the include nesting limit.
    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Resolve the given config files into descriptors.
    ///
    /// Files merge in argument order, so later files override earlier ones
    /// on duplicate keys. Includes of each file merge before the file
    /// itself.
    pub fn resolve(&self, paths: &[PathBuf]) -> Result<Resolution> {
        let loader = Loader::new(self.fs.as_ref());
        let mut documents = Vec::new();

        for path in paths {
            log::debug!("loading config file {}", path.display());
            let doc = expand::expand_document(&loader.load(path)?);
            documents.append(&mut include::resolve(doc, &loader, self.max_include_depth)?);
        }

        let merged = merge::merge(&documents);
        for conflict in &merged.conflicts {
            log::warn!(
                "duplicate definition of {}; keeping the one from {}",
                conflict.location(),
                conflict
                    .kept_source
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the later document".to_string())
            );
        }

        let (descriptors, errors) = Validator::new(self.env.as_ref()).validate(&merged);
        log::info!(
            "resolved {} repositories, {} validation errors",
            descriptors.len(),
            errors.len()
        );

        Ok(Resolution {
            repositories: extract::extract(descriptors),
            errors,
            conflicts: merged.conflicts,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::FakeEnvironment;
    use crate::error::Error;
    use crate::filesystem::MemoryFileSystem;
    use crate::validator::{ErrorKind, Vcs};

    fn resolver(fs: MemoryFileSystem) -> Resolver {
        let mut env = FakeEnvironment::new();
        env.set_home("/home/user");
        Resolver::with_parts(Box::new(fs), Box::new(env))
    }

    #[test]
    fn test_resolve_end_to_end() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file(
            "/c/vcspull.yaml",
            r#"
~/projects:
  flask: git+https://github.com/pallets/flask.git
  docs:
    vcs: hg
    url: hg+https://host/docs
"#,
        );

        let resolution = resolver(fs)
            .resolve(&[PathBuf::from("/c/vcspull.yaml")])
            .unwrap();

        assert!(resolution.is_valid());
        assert_eq!(resolution.repositories.len(), 2);

        let flask = resolution
            .repositories
            .iter()
            .find(|r| r.name == "flask")
            .unwrap();
        assert_eq!(flask.vcs, Vcs::Git);
        assert_eq!(flask.path, PathBuf::from("/home/user/projects/flask"));
    }

    #[test]
    fn test_resolve_collects_validation_errors() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file(
            "/c/vcspull.yaml",
            "/repos:\n  bad: https://host/no-prefix.git\n  good: git+https://host/ok.git\n",
        );

        let resolution = resolver(fs)
            .resolve(&[PathBuf::from("/c/vcspull.yaml")])
            .unwrap();

        assert!(!resolution.is_valid());
        assert_eq!(resolution.repositories.len(), 1);
        assert_eq!(resolution.errors.len(), 1);
        assert_eq!(resolution.errors[0].kind, ErrorKind::MissingProtocolPrefix);
    }

    #[test]
    fn test_resolve_later_file_overrides_earlier() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/c/a.yaml", "/repos:\n  r: git+https://host/old.git\n");
        fs.add_file("/c/b.yaml", "/repos:\n  r: git+https://host/new.git\n");

        let resolution = resolver(fs)
            .resolve(&[PathBuf::from("/c/a.yaml"), PathBuf::from("/c/b.yaml")])
            .unwrap();

        assert_eq!(resolution.repositories.len(), 1);
        assert_eq!(resolution.repositories[0].url, "git+https://host/new.git");
        assert_eq!(resolution.conflicts.len(), 1);
    }

    #[test]
    fn test_resolve_includer_overrides_include() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file(
            "/c/main.yaml",
            "include:\n  - ./shared.yaml\n/repos:\n  r: git+https://host/mine.git\n",
        );
        fs.add_file("/c/shared.yaml", "/repos:\n  r: git+https://host/shared.git\n");

        let resolution = resolver(fs)
            .resolve(&[PathBuf::from("/c/main.yaml")])
            .unwrap();

        assert_eq!(resolution.repositories.len(), 1);
        assert_eq!(resolution.repositories[0].url, "git+https://host/mine.git");
    }

    #[test]
    fn test_resolve_circular_include_is_fatal() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/c/a.yaml", "include:\n  - ./b.yaml\n");
        fs.add_file("/c/b.yaml", "include:\n  - ./a.yaml\n");

        let error = resolver(fs)
            .resolve(&[PathBuf::from("/c/a.yaml")])
            .unwrap_err();
        assert!(matches!(error, Error::CircularInclude { .. }));
    }

    #[test]
    fn test_resolve_missing_file_is_fatal() {
        let fs = MemoryFileSystem::new();
        let error = resolver(fs)
            .resolve(&[PathBuf::from("/c/missing.yaml")])
            .unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_resolve_output_is_sorted() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file(
            "/c/vcspull.yaml",
            "/repos:\n  zebra: git+https://host/z.git\n  apple: git+https://host/a.git\n",
        );

        let resolution = resolver(fs)
            .resolve(&[PathBuf::from("/c/vcspull.yaml")])
            .unwrap();

        let names: Vec<&str> = resolution
            .repositories
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["apple", "zebra"]);
    }
}
