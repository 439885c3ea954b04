//! # Include Resolution
//!
//! Expands `include` directives into the ordered list of documents they
//! pull in. Resolution is depth-first: each included document is fully
//! expanded (its own includes first) before the including document, so
//! under the merger's last-write-wins policy the includer overrides what
//! it includes, and a later include overrides an earlier one.
//!
//! Include paths resolve relative to the including file's directory and
//! may be glob patterns. A non-optional entry that matches nothing fails
//! with a `Configuration` error; entries marked `optional: true` may match
//! nothing.
//!
//! Cycles are detected over canonicalized (absolute, symlink-resolved)
//! paths currently being resolved; revisiting one fails with
//! `CircularInclude` naming the chain. A configurable depth limit bounds
//! acyclic but pathological chains.

use crate::config::{IncludeEntry, RawConfigDocument};
use crate::error::{Error, Result};
use crate::expand;
use crate::filesystem::FileSystem;
use crate::loader::Loader;
use crate::normalize;
use std::path::{Path, PathBuf};

/// Default bound on include nesting.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Expand a document's includes into an ordered document list.
///
/// The returned list contains every transitively included document followed
/// by `doc` itself (with its include directives consumed), in merge order.
pub fn resolve(
    doc: RawConfigDocument,
    loader: &Loader<'_>,
    max_depth: usize,
) -> Result<Vec<RawConfigDocument>> {
    let mut resolved = Vec::new();
    let mut in_flight = Vec::new();

    if let Some(source) = doc.source.clone() {
        in_flight.push(loader.fs().canonicalize(&source)?);
    }

    resolve_into(doc, loader, max_depth, max_depth, &mut in_flight, &mut resolved)?;
    Ok(resolved)
}

fn resolve_into(
    doc: RawConfigDocument,
    loader: &Loader<'_>,
    limit: usize,
    depth_remaining: usize,
    in_flight: &mut Vec<PathBuf>,
    resolved: &mut Vec<RawConfigDocument>,
) -> Result<()> {
    for entry in &doc.includes {
        for target in expand_entry(entry, doc.source.as_deref(), loader.fs())? {
            if depth_remaining == 0 {
                return Err(Error::IncludeDepthExceeded {
                    limit,
                    file: target.display().to_string(),
                });
            }

            let canonical = loader.fs().canonicalize(&target)?;
            if in_flight.contains(&canonical) {
                return Err(Error::CircularInclude {
                    cycle: format_cycle(in_flight, &canonical),
                });
            }

            let included = expand::expand_document(&loader.load(&target)?);
            in_flight.push(canonical);
            resolve_into(included, loader, limit, depth_remaining - 1, in_flight, resolved)?;
            in_flight.pop();
        }
    }

    resolved.push(RawConfigDocument {
        includes: Vec::new(),
        ..doc
    });
    Ok(())
}

/// Resolve one include entry to the concrete files it names.
fn expand_entry(
    entry: &IncludeEntry,
    source: Option<&Path>,
    fs: &dyn FileSystem,
) -> Result<Vec<PathBuf>> {
    // Lexically normalized so glob patterns never carry ./ segments.
    let target = match source.and_then(Path::parent) {
        Some(dir) if !Path::new(&entry.pattern).is_absolute() => {
            normalize::lexical_normalize(&dir.join(&entry.pattern))
        }
        _ => PathBuf::from(&entry.pattern),
    };

    let is_glob = entry
        .pattern
        .contains(|c| c == '*' || c == '?' || c == '[');

    let matches = if is_glob {
        fs.expand_glob(&target.to_string_lossy())?
    } else if fs.exists(&target) {
        vec![target]
    } else {
        Vec::new()
    };

    if matches.is_empty() && !entry.optional {
        return Err(Error::Configuration {
            message: format!("include target not found: {}", entry.pattern),
            hint: Some(
                "fix the path, or mark the entry {path: ..., optional: true} to skip it"
                    .to_string(),
            ),
        });
    }

    Ok(matches)
}

fn format_cycle(in_flight: &[PathBuf], repeated: &Path) -> String {
    let mut names: Vec<String> = in_flight.iter().map(|p| p.display().to_string()).collect();
    names.push(repeated.display().to_string());
    names.join(" -> ")
}
