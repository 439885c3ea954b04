//! # Descriptor Extraction
//!
//! Final pipeline stage: orders validated descriptors for consumers. The
//! sync executor wants repositories grouped by parent directory so clones
//! under one directory happen together, with a stable name order inside
//! each group.

use crate::validator::RepositoryDescriptor;
use std::path::PathBuf;

/// Sort descriptors by parent directory, then by name.
///
/// The result is deterministic for a given input set regardless of the
/// order validation produced it in.
pub fn extract(mut descriptors: Vec<RepositoryDescriptor>) -> Vec<RepositoryDescriptor> {
    descriptors.sort_by_key(|d| {
        (
            d.path.parent().map(PathBuf::from).unwrap_or_default(),
            d.name.clone(),
        )
    });
    descriptors
}
