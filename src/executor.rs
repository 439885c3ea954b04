//! # Executor Boundary
//!
//! The resolver ends at [`RepositoryDescriptor`]; running VCS commands is a
//! separate concern behind this trait. Nothing in this crate shells out,
//! touches the network, or writes to checkout paths.

use crate::error::Result;
use crate::validator::RepositoryDescriptor;

/// What a sync run does with one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    /// The checkout path does not exist yet.
    Clone,
    /// The checkout path holds an existing working copy.
    Update,
}

/// Executes VCS operations for validated descriptors.
///
/// Implementations own all process and filesystem side effects. The
/// resolver hands over descriptors and never observes the outcome.
pub trait VcsExecutor: Send + Sync {
    fn run(&self, repo: &RepositoryDescriptor, operation: SyncOperation) -> Result<()>;
}
