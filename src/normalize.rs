//! # Path and URL Normalization
//!
//! Pure helpers used by the validator to build final descriptors: tilde
//! and environment-variable expansion, lexical `.`/`..` resolution, VCS
//! prefix splitting, and percent-decoding for URL character checks.
//!
//! Everything here is deterministic and side-effect-free. No function
//! touches the filesystem - existence and writability checks belong to the
//! sync executor, not the resolver. Environment lookups go through the
//! injected [`Environment`].

use crate::environment::Environment;
use crate::expand::VCS_PREFIXES;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` or `~/` into the home directory.
///
/// Left untouched when no home directory is known, or for `~user` forms.
pub fn expand_tilde(raw: &str, env: &dyn Environment) -> String {
    let Some(home) = env.home_dir() else {
        return raw.to_string();
    };

    if raw == "~" {
        home.display().to_string()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        raw.to_string()
    }
}

/// Expand `$VAR` and `${VAR}` references.
///
/// Unset variables are left verbatim so the validator can report the
/// offending text instead of silently producing an empty segment.
pub fn expand_env_vars(raw: &str, env: &dyn Environment) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    let name = &braced[..end];
                    match env.var(name) {
                        Some(value) => out.push_str(&value),
                        None => out.push_str(&rest[idx..idx + end + 3]),
                    }
                    rest = &braced[end + 1..];
                }
                None => {
                    // Unterminated ${ - emit the remainder verbatim.
                    out.push_str(&rest[idx..]);
                    return out;
                }
            }
            continue;
        }

        let name_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        let name = &after[..name_len];
        match env.var(name) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

/// Resolve `.` and `..` segments lexically, without consulting the
/// filesystem.
///
/// `..` pops a preceding normal segment; at the root it is dropped; in a
/// relative path with nothing left to pop it is kept, so callers can still
/// detect escapes.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    let mut out = PathBuf::new();
    for part in parts {
        out.push(part.as_os_str());
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Normalize a base path: expand `~`/`$VAR`, anchor relative paths at the
/// working directory, and resolve dot segments.
pub fn normalize_base_path(raw: &str, env: &dyn Environment) -> PathBuf {
    let expanded = expand_env_vars(&expand_tilde(raw, env), env);
    let path = PathBuf::from(expanded);
    let anchored = if path.is_absolute() {
        path
    } else {
        env.current_dir().join(path)
    };
    lexical_normalize(&anchored)
}

/// Normalize a repository path: expand `~`/`$VAR`, join onto the base path
/// when relative, and resolve dot segments.
pub fn normalize_path(raw: &str, base_path: &Path, env: &dyn Environment) -> PathBuf {
    let expanded = expand_env_vars(&expand_tilde(raw, env), env);
    let path = PathBuf::from(expanded);
    let anchored = if path.is_absolute() {
        path
    } else {
        base_path.join(path)
    };
    lexical_normalize(&anchored)
}

/// Split an optional `git+`/`hg+`/`svn+` prefix off a URL.
///
/// Returns the logical VCS tag and the transport remainder. The stored
/// canonical URL keeps the original text; this split exists for scheme
/// consistency checks.
pub fn split_vcs_prefix(raw: &str) -> (Option<&'static str>, &str) {
    for (prefix, vcs) in VCS_PREFIXES {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return (Some(vcs), rest);
        }
    }
    (None, raw)
}

/// Percent-decode a URL for character and length checks.
///
/// Decoding is byte-level and lossy; the canonical stored form keeps the
/// original encoding.
pub fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let high = (bytes[i + 1] as char).to_digit(16);
            let low = (bytes[i + 2] as char).to_digit(16);
            if let (Some(high), Some(low)) = (high, low) {
                out.push((high * 16 + low) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
