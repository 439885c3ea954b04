//! # Raw Configuration Model
//!
//! This module defines the loosely-typed data structures that mirror the
//! on-disk shape of a vcspull configuration file, as well as the logic for
//! converting a parsed YAML/JSON value into them. The raw model is as
//! permissive as the source format allows: fields are optional, shorthand
//! is preserved, and unknown keys are kept for later diagnostics. Strict
//! constraints live in the [`crate::validator`].
//!
//! ## Key Components
//!
//! - **`RawConfigDocument`**: the top-level parse result of one file - an
//!   ordered list of `ConfigSection`s plus any `include` directives.
//!
//! - **`ConfigSection`**: one base-path block mapping repository names to
//!   their definitions.
//!
//! - **`RawRepository`**: a repository definition as written - either a
//!   bare URL string (shorthand) or a full `RawRepositoryRecord`.
//!
//! ## On-disk shape
//!
//! ```yaml
//! /absolute/or/~/base/path:
//!   repo-name:
//!     vcs: git
//!     url: git+https://example.com/user/repo.git
//!     remotes:
//!       upstream: git+https://example.com/upstream/repo.git
//!   other-repo: git+https://example.com/user/other.git
//! include:
//!   - ./other-config.yaml
//!   - {path: ./optional.yaml, optional: true}
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The reserved top-level key holding include directives.
pub const INCLUDE_KEY: &str = "include";

/// A remote definition before validation.
///
/// On disk a remote is either a bare URL string or a mapping with `url`
/// and optional `fetch`/`push` refspecs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRemote {
    /// Remote URL, required by the validator but optional here.
    pub url: Option<String>,
    /// Optional fetch refspec.
    pub fetch: Option<String>,
    /// Optional push refspec.
    pub push: Option<String>,
}

/// A repository record before validation. All constraints are deferred.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RawRepositoryRecord {
    /// VCS type string, inferred from the URL prefix when absent.
    pub vcs: Option<String>,
    /// Repository key within its base path. Filled by the expander.
    pub name: String,
    /// Checkout path; defaults to base-path/name when absent.
    pub path: Option<String>,
    /// Repository URL, possibly in `vcs+transport://` shorthand.
    pub url: Option<String>,
    /// Named remotes (git only, enforced by the validator).
    pub remotes: BTreeMap<String, RawRemote>,
    /// Commands to run after a sync completes, in order.
    pub shell_command_after: Vec<String>,
    /// Unknown keys, preserved for diagnostics rather than rejected.
    #[serde(skip)]
    pub extra: BTreeMap<String, Value>,
}

/// A repository definition as written in the file.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRepository {
    /// Bare URL string, e.g. `git+https://example.com/user/repo.git`.
    Shorthand(String),
    /// Full mapping form.
    Record(RawRepositoryRecord),
}

/// One base-path block: repository name to definition.
///
/// Names are unique within one file by construction (mapping keys); they
/// may collide across files, which the merger resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSection {
    /// The directory under which this block's repositories are rooted,
    /// exactly as spelled in the file (normalization happens later).
    pub base_path: String,
    /// Repository definitions keyed by name.
    pub repos: BTreeMap<String, RawRepository>,
}

/// One `include` directive entry.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeEntry {
    /// Path or glob pattern, resolved relative to the including file.
    pub pattern: String,
    /// Optional entries may match nothing without failing resolution.
    pub optional: bool,
}

/// The top-level parse result of one configuration file. Immutable after
/// parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawConfigDocument {
    /// The file this document was loaded from, when known.
    pub source: Option<PathBuf>,
    /// Base-path blocks in file order.
    pub sections: Vec<ConfigSection>,
    /// Include directives in file order.
    pub includes: Vec<IncludeEntry>,
}

impl RawConfigDocument {
    /// True when the document declares no repositories and no includes.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.includes.is_empty()
    }
}

fn file_label(source: Option<&Path>) -> String {
    source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<input>".to_string())
}

fn parse_error(source: Option<&Path>, message: String, hint: Option<&str>) -> Error {
    Error::ConfigParse {
        file: file_label(source),
        message,
        hint: hint.map(String::from),
    }
}

/// Convert a parsed YAML/JSON value into a `RawConfigDocument`.
///
/// The top level must be a mapping keyed by base-path strings (plus the
/// reserved `include` key); anything else is a `ConfigParse` error. A null
/// document (empty file) converts to an empty document. Within each base
/// path every value must be a mapping (full record) or a string
/// (shorthand).
pub fn to_raw(value: Value, source: Option<PathBuf>) -> Result<RawConfigDocument> {
    let src = source.as_deref();

    let map = match value {
        Value::Null => {
            return Ok(RawConfigDocument {
                source,
                ..Default::default()
            })
        }
        Value::Mapping(map) => map,
        other => {
            return Err(parse_error(
                src,
                format!(
                    "top level must be a mapping of base paths, found {}",
                    value_kind(&other)
                ),
                Some("start the file with a directory key like /home/user/projects:"),
            ))
        }
    };

    let mut sections = Vec::new();
    let mut includes = Vec::new();

    for (key, value) in map {
        let base_path = key.as_str().ok_or_else(|| {
            parse_error(
                src,
                "top-level keys must be base-path strings".to_string(),
                None,
            )
        })?;

        if base_path == INCLUDE_KEY {
            includes = parse_includes(value, src)?;
            continue;
        }

        sections.push(parse_section(base_path, value, src)?);
    }

    Ok(RawConfigDocument {
        source,
        sections,
        includes,
    })
}

fn parse_section(base_path: &str, value: Value, src: Option<&Path>) -> Result<ConfigSection> {
    let map = match value {
        Value::Mapping(map) => map,
        other => {
            return Err(parse_error(
                src,
                format!(
                    "base path {:?} must map repository names to definitions, found {}",
                    base_path,
                    value_kind(&other)
                ),
                None,
            ))
        }
    };

    let mut repos = BTreeMap::new();
    for (key, value) in map {
        let name = key.as_str().ok_or_else(|| {
            parse_error(
                src,
                format!("repository keys under {:?} must be strings", base_path),
                None,
            )
        })?;
        let repo = parse_repository(base_path, name, value, src)?;
        repos.insert(name.to_string(), repo);
    }

    Ok(ConfigSection {
        base_path: base_path.to_string(),
        repos,
    })
}

fn parse_repository(
    base_path: &str,
    name: &str,
    value: Value,
    src: Option<&Path>,
) -> Result<RawRepository> {
    let location = format!("{}/{}", base_path, name);

    let map = match value {
        Value::String(url) => return Ok(RawRepository::Shorthand(url)),
        Value::Mapping(map) => map,
        other => {
            return Err(parse_error(
                src,
                format!(
                    "repository {} must be a URL string or a mapping, found {}",
                    location,
                    value_kind(&other)
                ),
                Some("shorthand form: repo-name: git+https://example.com/user/repo.git"),
            ))
        }
    };

    let mut record = RawRepositoryRecord {
        name: name.to_string(),
        ..Default::default()
    };

    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| {
            parse_error(
                src,
                format!("keys of repository {} must be strings", location),
                None,
            )
        })?;

        match key {
            "vcs" => record.vcs = Some(expect_string(&location, key, value, src)?),
            "url" => record.url = Some(expect_string(&location, key, value, src)?),
            "path" => record.path = Some(expect_string(&location, key, value, src)?),
            "name" => record.name = expect_string(&location, key, value, src)?,
            "remotes" => record.remotes = parse_remotes(&location, value, src)?,
            "shell_command_after" => {
                record.shell_command_after = parse_commands(&location, value, src)?
            }
            // Unknown keys are preserved, not rejected; the validator and
            // merge diagnostics can still see original author intent.
            other => {
                record.extra.insert(other.to_string(), value);
            }
        }
    }

    Ok(RawRepository::Record(record))
}

fn parse_remotes(
    location: &str,
    value: Value,
    src: Option<&Path>,
) -> Result<BTreeMap<String, RawRemote>> {
    let map = match value {
        Value::Mapping(map) => map,
        other => {
            return Err(parse_error(
                src,
                format!(
                    "remotes of {} must be a mapping of remote names, found {}",
                    location,
                    value_kind(&other)
                ),
                None,
            ))
        }
    };

    let mut remotes = BTreeMap::new();
    for (key, value) in map {
        let name = key.as_str().ok_or_else(|| {
            parse_error(
                src,
                format!("remote names of {} must be strings", location),
                None,
            )
        })?;

        let remote = match value {
            Value::String(url) => RawRemote {
                url: Some(url),
                fetch: None,
                push: None,
            },
            Value::Mapping(fields) => {
                let mut remote = RawRemote {
                    url: None,
                    fetch: None,
                    push: None,
                };
                for (field, value) in fields {
                    let field = field.as_str().unwrap_or_default().to_string();
                    let text = expect_string(location, &format!("remotes.{}.{}", name, field), value, src)?;
                    match field.as_str() {
                        "url" => remote.url = Some(text),
                        "fetch" => remote.fetch = Some(text),
                        "push" => remote.push = Some(text),
                        other => {
                            return Err(parse_error(
                                src,
                                format!(
                                    "unknown field {:?} on remote {} of {}",
                                    other, name, location
                                ),
                                Some("remotes accept url, fetch, and push"),
                            ))
                        }
                    }
                }
                remote
            }
            other => {
                return Err(parse_error(
                    src,
                    format!(
                        "remote {} of {} must be a URL string or a mapping, found {}",
                        name,
                        location,
                        value_kind(&other)
                    ),
                    None,
                ))
            }
        };

        remotes.insert(name.to_string(), remote);
    }

    Ok(remotes)
}

fn parse_commands(location: &str, value: Value, src: Option<&Path>) -> Result<Vec<String>> {
    match value {
        // Single-command shorthand.
        Value::String(cmd) => Ok(vec![cmd]),
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(cmd) => Ok(cmd),
                other => Err(parse_error(
                    src,
                    format!(
                        "shell_command_after of {} must contain strings, found {}",
                        location,
                        value_kind(&other)
                    ),
                    None,
                )),
            })
            .collect(),
        other => Err(parse_error(
            src,
            format!(
                "shell_command_after of {} must be a string or a sequence, found {}",
                location,
                value_kind(&other)
            ),
            None,
        )),
    }
}

fn parse_includes(value: Value, src: Option<&Path>) -> Result<Vec<IncludeEntry>> {
    let seq = match value {
        Value::Sequence(seq) => seq,
        other => {
            return Err(parse_error(
                src,
                format!(
                    "include must be a sequence of paths, found {}",
                    value_kind(&other)
                ),
                Some("include:\n  - ./other-config.yaml"),
            ))
        }
    };

    let mut entries = Vec::new();
    for item in seq {
        match item {
            Value::String(pattern) => entries.push(IncludeEntry {
                pattern,
                optional: false,
            }),
            Value::Mapping(map) => {
                let mut pattern = None;
                let mut optional = false;
                for (key, value) in map {
                    match key.as_str() {
                        Some("path") => {
                            pattern = value.as_str().map(String::from);
                        }
                        Some("optional") => {
                            optional = value.as_bool().unwrap_or(false);
                        }
                        _ => {
                            return Err(parse_error(
                                src,
                                "include entries accept only path and optional".to_string(),
                                None,
                            ))
                        }
                    }
                }
                let pattern = pattern.ok_or_else(|| {
                    parse_error(src, "include entry is missing path".to_string(), None)
                })?;
                entries.push(IncludeEntry { pattern, optional });
            }
            other => {
                return Err(parse_error(
                    src,
                    format!(
                        "include entries must be paths or mappings, found {}",
                        value_kind(&other)
                    ),
                    None,
                ))
            }
        }
    }

    Ok(entries)
}

fn expect_string(location: &str, key: &str, value: Value, src: Option<&Path>) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(parse_error(
            src,
            format!(
                "{} of {} must be a string, found {}",
                key,
                location,
                value_kind(&other)
            ),
            None,
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
