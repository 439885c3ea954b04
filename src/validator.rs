//! # Validation
//!
//! Converts raw, merged records into strictly-typed repository
//! descriptors. Construction of a [`RepositoryDescriptor`] is atomic: it
//! either fully succeeds or the record contributes one or more
//! [`ValidationError`] entries and produces nothing.
//!
//! Validation never aborts on a data error. The pass is exhaustive: every
//! record in the merged configuration is checked and the full error set is
//! returned in one report, so a CLI can show all problems at once instead
//! of first-error-wins.
//!
//! ## Checks
//!
//! - VCS type present (inferred or explicit) and one of git/hg/svn.
//! - URL scheme consistent with the VCS type, no whitespace or control
//!   characters, length capped (both checked on the percent-decoded text).
//! - Path normalized, length capped, no characters that break common
//!   filesystems; relative paths must stay under their base path.
//! - Name non-empty, no path separators, length capped.
//! - Remotes only for git; remote URLs held to the same URL rules.

use crate::config::RawRepositoryRecord;
use crate::environment::Environment;
use crate::merge::MergedConfig;
use crate::normalize;
use crate::suggestions;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Maximum repository name length, in characters.
pub const MAX_NAME_LEN: usize = 255;
/// Maximum resolved path length, in bytes.
pub const MAX_PATH_LEN: usize = 255;
/// Maximum URL length, in bytes.
pub const MAX_URL_LEN: usize = 2048;

/// Characters rejected in resolved paths (conservative cross-filesystem
/// policy).
pub const INVALID_PATH_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Transport schemes accepted without a `vcs+` prefix when the VCS type is
/// explicit.
const BARE_SCHEMES: [&str; 4] = ["https", "http", "ssh", "file"];

/// Version control system of a validated repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vcs {
    Git,
    Hg,
    Svn,
}

impl Vcs {
    /// All valid type strings.
    pub const NAMES: [&'static str; 3] = ["git", "hg", "svn"];

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Hg => "hg",
            Self::Svn => "svn",
        }
    }
}

impl FromStr for Vcs {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(Self::Git),
            "hg" => Ok(Self::Hg),
            "svn" => Ok(Self::Svn),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated git remote. Owned by its parent descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GitRemote {
    pub name: String,
    pub url: String,
    pub fetch: Option<String>,
    pub push: Option<String>,
}

/// A fully validated, normalized repository descriptor - the unit the sync
/// executor consumes. Never partially valid: construction succeeds whole
/// or not at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub vcs: Vcs,
    pub url: String,
    pub path: PathBuf,
    /// Non-empty only when `vcs == Vcs::Git`.
    pub remotes: BTreeMap<String, GitRemote>,
    pub shell_command_after: Vec<String>,
}

/// Category of a per-record validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    MissingProtocolPrefix,
    InvalidUrl,
    PathTraversal,
    InvalidPathCharacters,
    PathTooLong,
    UrlTooLong,
    InvalidVcsType,
    CrossFieldViolation,
    EmptyOrInvalidName,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingProtocolPrefix => "MissingProtocolPrefix",
            Self::InvalidUrl => "InvalidUrl",
            Self::PathTraversal => "PathTraversal",
            Self::InvalidPathCharacters => "InvalidPathCharacters",
            Self::PathTooLong => "PathTooLong",
            Self::UrlTooLong => "UrlTooLong",
            Self::InvalidVcsType => "InvalidVcsType",
            Self::CrossFieldViolation => "CrossFieldViolation",
            Self::EmptyOrInvalidName => "EmptyOrInvalidName",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One per-record validation failure. Collected, never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// `base-path/repo-name/field` in dot-notation for nested fields.
    pub location: String,
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.location, self.message, self.kind)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {}", suggestion)?;
        }
        Ok(())
    }
}

/// Validates merged records into descriptors. Constructed once per
/// resolution run; holds no process-wide state.
pub struct Validator<'a> {
    env: &'a dyn Environment,
}

impl<'a> Validator<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }

    /// Validate every record in the merged configuration.
    ///
    /// Returns the descriptors for all valid records and the complete
    /// error set for the invalid ones.
    pub fn validate(
        &self,
        merged: &MergedConfig,
    ) -> (Vec<RepositoryDescriptor>, Vec<ValidationError>) {
        let mut descriptors = Vec::new();
        let mut errors = Vec::new();

        for (base_path, repos) in &merged.sections {
            let base = normalize::normalize_base_path(base_path, self.env);

            for (name, record) in repos {
                match self.validate_record(base_path, &base, name, record) {
                    Ok(descriptor) => descriptors.push(descriptor),
                    Err(mut record_errors) => errors.append(&mut record_errors),
                }
            }
        }

        (descriptors, errors)
    }

    fn validate_record(
        &self,
        raw_base: &str,
        base: &Path,
        name: &str,
        record: &RawRepositoryRecord,
    ) -> Result<RepositoryDescriptor, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let at = |field: &str| format!("{}/{}/{}", raw_base, name, field);

        if !record.extra.is_empty() {
            let keys: Vec<&String> = record.extra.keys().collect();
            log::warn!("{}/{}: ignoring unknown keys {:?}", raw_base, name, keys);
        }

        if let Some(error) = check_name(&record.name, at("name")) {
            errors.push(error);
        }

        let vcs = self.check_vcs(record, &at, &mut errors);
        self.check_url(record, vcs, &at, &mut errors);
        let path = self.check_path(record, base, &at, &mut errors);
        let remotes = self.check_remotes(record, vcs, &at, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        // With no errors recorded, every checked field produced a value.
        match (vcs, record.url.clone(), path) {
            (Some(vcs), Some(url), Some(path)) => Ok(RepositoryDescriptor {
                name: record.name.clone(),
                vcs,
                url,
                path,
                remotes,
                shell_command_after: record.shell_command_after.clone(),
            }),
            _ => Err(errors),
        }
    }

    fn check_vcs(
        &self,
        record: &RawRepositoryRecord,
        at: &dyn Fn(&str) -> String,
        errors: &mut Vec<ValidationError>,
    ) -> Option<Vcs> {
        match record.vcs.as_deref() {
            Some(raw) => match raw.parse() {
                Ok(vcs) => Some(vcs),
                Err(()) => {
                    errors.push(ValidationError {
                        location: at("vcs"),
                        kind: ErrorKind::InvalidVcsType,
                        message: format!("unknown vcs type {:?}", raw),
                        suggestion: suggestions::similar_vcs(raw)
                            .map(|v| format!("did you mean '{}'?", v)),
                    });
                    None
                }
            },
            None => {
                let url = record.url.as_deref().unwrap_or_default();
                errors.push(ValidationError {
                    location: at("url"),
                    kind: ErrorKind::MissingProtocolPrefix,
                    message:
                        "cannot determine vcs type: no explicit vcs and no git+/hg+/svn+ url prefix"
                            .to_string(),
                    suggestion: Some(suggestions::protocol_prefix_suggestion(url)),
                });
                None
            }
        }
    }

    fn check_url(
        &self,
        record: &RawRepositoryRecord,
        vcs: Option<Vcs>,
        at: &dyn Fn(&str) -> String,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(raw) = record.url.as_deref() else {
            errors.push(ValidationError {
                location: at("url"),
                kind: ErrorKind::InvalidUrl,
                message: "repository has no url".to_string(),
                suggestion: Some("add url: git+https://example.com/user/repo.git".to_string()),
            });
            return;
        };

        errors.extend(check_url_text(
            raw,
            vcs,
            record.vcs.is_some(),
            at("url"),
        ));
    }

    fn check_path(
        &self,
        record: &RawRepositoryRecord,
        base: &Path,
        at: &dyn Fn(&str) -> String,
        errors: &mut Vec<ValidationError>,
    ) -> Option<PathBuf> {
        // The expander fills path; an empty raw record defaults to the key
        // under its base.
        let raw = record.path.as_deref().unwrap_or(record.name.as_str());
        let expanded =
            normalize::expand_env_vars(&normalize::expand_tilde(raw, self.env), self.env);
        let path = normalize::normalize_path(raw, base, self.env);
        let mut ok = true;

        // An explicitly absolute path may live anywhere; a relative path
        // resolves against the base and must not .. its way out of it.
        if !Path::new(&expanded).is_absolute() && !path.starts_with(base) {
            errors.push(ValidationError {
                location: at("path"),
                kind: ErrorKind::PathTraversal,
                message: format!(
                    "path {} escapes its base path {}",
                    path.display(),
                    base.display()
                ),
                suggestion: Some("remove .. segments or use an absolute path".to_string()),
            });
            ok = false;
        }

        let text = path.display().to_string();
        if text.len() > MAX_PATH_LEN {
            errors.push(ValidationError {
                location: at("path"),
                kind: ErrorKind::PathTooLong,
                message: format!(
                    "resolved path is {} bytes, limit is {}",
                    text.len(),
                    MAX_PATH_LEN
                ),
                suggestion: None,
            });
            ok = false;
        }

        if let Some(bad) = text.chars().find(|c| INVALID_PATH_CHARS.contains(c)) {
            errors.push(ValidationError {
                location: at("path"),
                kind: ErrorKind::InvalidPathCharacters,
                message: format!("path contains {:?}, unsafe on common filesystems", bad),
                suggestion: None,
            });
            ok = false;
        }

        ok.then_some(path)
    }

    fn check_remotes(
        &self,
        record: &RawRepositoryRecord,
        vcs: Option<Vcs>,
        at: &dyn Fn(&str) -> String,
        errors: &mut Vec<ValidationError>,
    ) -> BTreeMap<String, GitRemote> {
        if record.remotes.is_empty() {
            return BTreeMap::new();
        }

        // Remotes are a git concept; flag them on any other known vcs.
        if let Some(vcs) = vcs {
            if vcs != Vcs::Git {
                errors.push(ValidationError {
                    location: at("remotes"),
                    kind: ErrorKind::CrossFieldViolation,
                    message: format!("remotes require vcs git, found {}", vcs),
                    suggestion: Some("remove the remotes block or set vcs: git".to_string()),
                });
                return BTreeMap::new();
            }
        }

        let mut remotes = BTreeMap::new();
        for (remote_name, raw) in &record.remotes {
            let field = format!("remotes.{}.url", remote_name);
            match raw.url.as_deref() {
                Some(url) => {
                    let url_errors = check_url_text(url, Some(Vcs::Git), true, at(&field));
                    if url_errors.is_empty() {
                        remotes.insert(
                            remote_name.clone(),
                            GitRemote {
                                name: remote_name.clone(),
                                url: url.to_string(),
                                fetch: raw.fetch.clone(),
                                push: raw.push.clone(),
                            },
                        );
                    } else {
                        errors.extend(url_errors);
                    }
                }
                None => errors.push(ValidationError {
                    location: at(&field),
                    kind: ErrorKind::InvalidUrl,
                    message: format!("remote {} has no url", remote_name),
                    suggestion: None,
                }),
            }
        }

        remotes
    }
}

/// Validate one URL string against the rules shared by repository and
/// remote URLs.
fn check_url_text(
    raw: &str,
    vcs: Option<Vcs>,
    vcs_explicit: bool,
    location: String,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Length and character rules apply to the decoded text; the stored
    // canonical form keeps the original encoding.
    let decoded = normalize::percent_decode(raw);
    if decoded.len() > MAX_URL_LEN {
        errors.push(ValidationError {
            location: location.clone(),
            kind: ErrorKind::UrlTooLong,
            message: format!(
                "url is {} bytes after decoding, limit is {}",
                decoded.len(),
                MAX_URL_LEN
            ),
            suggestion: None,
        });
    }

    if let Some(bad) = decoded.chars().find(|c| c.is_whitespace() || c.is_control()) {
        errors.push(ValidationError {
            location: location.clone(),
            kind: ErrorKind::InvalidUrl,
            message: format!("url contains {:?}", bad),
            suggestion: Some("percent-encode whitespace and control characters".to_string()),
        });
        return errors;
    }

    let (prefix, transport) = normalize::split_vcs_prefix(raw);
    match prefix {
        Some(tag) => {
            if let Some(vcs) = vcs {
                if tag != vcs.as_str() {
                    errors.push(ValidationError {
                        location: location.clone(),
                        kind: ErrorKind::InvalidUrl,
                        message: format!(
                            "url prefix {}+ does not match vcs {}",
                            tag, vcs
                        ),
                        suggestion: Some(format!("use {}+ or change the vcs field", vcs)),
                    });
                }
            }
            if let Err(e) = url::Url::parse(transport) {
                errors.push(ValidationError {
                    location,
                    kind: ErrorKind::InvalidUrl,
                    message: format!("malformed url after {}+ prefix: {}", tag, e),
                    suggestion: None,
                });
            }
        }
        None => {
            // No prefix and no explicit vcs is already reported as
            // MissingProtocolPrefix; avoid piling on.
            if !vcs_explicit {
                return errors;
            }

            match url::Url::parse(raw) {
                Ok(parsed) if BARE_SCHEMES.contains(&parsed.scheme()) => {}
                Ok(parsed) => errors.push(ValidationError {
                    location,
                    kind: ErrorKind::InvalidUrl,
                    message: format!(
                        "scheme {:?} is not allowed without a vcs prefix",
                        parsed.scheme()
                    ),
                    suggestion: vcs.map(|v| format!("prefix the url with {}+", v)),
                }),
                Err(e) => errors.push(ValidationError {
                    location,
                    kind: ErrorKind::InvalidUrl,
                    message: format!("malformed url: {}", e),
                    suggestion: Some(
                        "use scheme://host/path, e.g. https://example.com/user/repo.git"
                            .to_string(),
                    ),
                }),
            }
        }
    }

    errors
}

fn check_name(name: &str, location: String) -> Option<ValidationError> {
    if name.is_empty() {
        return Some(ValidationError {
            location,
            kind: ErrorKind::EmptyOrInvalidName,
            message: "repository name is empty".to_string(),
            suggestion: None,
        });
    }

    if name.contains('/') || name.contains('\\') {
        return Some(ValidationError {
            location,
            kind: ErrorKind::EmptyOrInvalidName,
            message: format!("repository name {:?} contains path separators", name),
            suggestion: None,
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Some(ValidationError {
            location,
            kind: ErrorKind::EmptyOrInvalidName,
            message: format!(
                "repository name is longer than {} characters",
                MAX_NAME_LEN
            ),
            suggestion: None,
        });
    }

    None
}
