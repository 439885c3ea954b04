//! # Configuration Merging
//!
//! Combines records from multiple loaded documents into one logical
//! configuration with a deterministic last-write-wins policy per
//! (base-path, repo-name) key. Structurally identical duplicates are
//! silent; differing duplicates are resolved in favor of the later
//! document and recorded as a [`MergeConflict`] for warning output.
//!
//! Base-path strings are compared syntactically at this stage - two
//! spellings of the same directory are distinct merge keys. Normalization
//! happens in the validator, so merge-key equality never depends on the
//! environment.

use crate::config::RawConfigDocument;
use crate::config::RawRepositoryRecord;
use crate::expand;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A duplicate (base-path, repo-name) key with differing definitions.
///
/// Not an error: the later definition won, and this record carries both
/// sides for user-facing warning output.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConflict {
    /// Base path of the conflicting key, as spelled.
    pub base_path: String,
    /// Repository name of the conflicting key.
    pub name: String,
    /// The definition that won (from the later document).
    pub kept: RawRepositoryRecord,
    /// The definition that was overridden.
    pub replaced: RawRepositoryRecord,
    /// Source file of the winning definition, when known.
    pub kept_source: Option<PathBuf>,
    /// Source file of the overridden definition, when known.
    pub replaced_source: Option<PathBuf>,
}

impl MergeConflict {
    /// The conflicting key as `base-path/repo-name`.
    pub fn location(&self) -> String {
        format!("{}/{}", self.base_path, self.name)
    }
}

/// The merger's output: exactly one record per (base-path, repo-name) key,
/// plus the conflicts encountered while getting there.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    /// base-path -> repo-name -> winning record.
    pub sections: BTreeMap<String, BTreeMap<String, RawRepositoryRecord>>,
    /// Differing duplicates, in the order they were discovered.
    pub conflicts: Vec<MergeConflict>,
}

impl MergedConfig {
    /// Total number of repository records.
    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    /// True when no records were merged.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Merge documents in the order supplied; later documents override earlier
/// ones for identical keys.
pub fn merge(documents: &[RawConfigDocument]) -> MergedConfig {
    let mut sections: BTreeMap<String, BTreeMap<String, (RawRepositoryRecord, Option<PathBuf>)>> =
        BTreeMap::new();
    let mut conflicts = Vec::new();

    for doc in documents {
        for section in &doc.sections {
            let entries = sections.entry(section.base_path.clone()).or_default();

            for (name, repo) in &section.repos {
                // Idempotent; documents normally arrive pre-expanded.
                let record = expand::expand(repo, &section.base_path, name);

                match entries.get(name) {
                    Some((existing, _)) if *existing == record => {}
                    Some((existing, existing_source)) => {
                        conflicts.push(MergeConflict {
                            base_path: section.base_path.clone(),
                            name: name.clone(),
                            kept: record.clone(),
                            replaced: existing.clone(),
                            kept_source: doc.source.clone(),
                            replaced_source: existing_source.clone(),
                        });
                        entries.insert(name.clone(), (record, doc.source.clone()));
                    }
                    None => {
                        entries.insert(name.clone(), (record, doc.source.clone()));
                    }
                }
            }
        }
    }

    MergedConfig {
        sections: sections
            .into_iter()
            .map(|(base_path, repos)| {
                let repos = repos
                    .into_iter()
                    .map(|(name, (record, _))| (name, record))
                    .collect();
                (base_path, repos)
            })
            .collect(),
        conflicts,
    }
}
