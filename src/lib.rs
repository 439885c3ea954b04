//! # vcspull
//!
//! This library resolves declarative configuration files describing
//! collections of version-controlled repositories (git, hg, svn) into
//! validated repository descriptors. It backs the `vcspull` command-line
//! tool but can be embedded by any application that wants to reuse the
//! configuration format.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::PathBuf;
//! use vcspull::environment::FakeEnvironment;
//! use vcspull::filesystem::MemoryFileSystem;
//! use vcspull::resolver::Resolver;
//!
//! let mut fs = MemoryFileSystem::new();
//! fs.add_file(
//!     "/etc/vcspull.yaml",
//!     "/repos:\n  flask: git+https://github.com/pallets/flask.git\n",
//! );
//!
//! let resolver = Resolver::with_parts(Box::new(fs), Box::new(FakeEnvironment::new()));
//! let resolution = resolver.resolve(&[PathBuf::from("/etc/vcspull.yaml")]).unwrap();
//!
//! assert!(resolution.is_valid());
//! assert_eq!(resolution.repositories[0].name, "flask");
//! assert_eq!(resolution.repositories[0].path, PathBuf::from("/repos/flask"));
//! ```
//!
//! ## Pipeline
//!
//! Resolution runs as a fixed sequence of stages, each with its own module:
//!
//! 1. **Loading (`loader`)**: read YAML or JSON files into the raw model
//!    defined in `config`.
//! 2. **Expansion (`expand`)**: rewrite shorthand URL strings into full
//!    repository records, inferring the VCS type from `git+`/`hg+`/`svn+`
//!    prefixes.
//! 3. **Include resolution (`include`)**: expand `include` directives
//!    depth-first into an ordered document list, detecting cycles.
//! 4. **Merging (`merge`)**: combine documents with last-write-wins per
//!    (base-path, repo-name) key, recording conflicts.
//! 5. **Validation (`validator`)**: check every record exhaustively and
//!    build strictly-typed descriptors, normalizing paths via `normalize`.
//! 6. **Extraction (`extract`)**: order descriptors for consumers.
//!
//! The pipeline never executes VCS commands, touches the network, or
//! mutates the filesystem; running syncs is behind the `executor` trait.
//! Filesystem reads and environment lookups go through the `filesystem`
//! and `environment` traits so everything resolves deterministically in
//! tests.

pub mod config;
pub mod defaults;
pub mod environment;
pub mod error;
pub mod executor;
pub mod expand;
pub mod extract;
pub mod filesystem;
pub mod include;
pub mod loader;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod resolver;
pub mod suggestions;
pub mod validator;

#[cfg(test)]
mod expand_proptest;
