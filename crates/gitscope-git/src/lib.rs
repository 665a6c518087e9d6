//! # gitscope-git
//!
//! Git history access for gitscope.
//!
//! This crate is the git-log provider the layout engine treats as an
//! external collaborator: it pages commit history out of a repository in
//! reverse-chronological order and reads the branch-ref table, both in the
//! shape `gitscope-graph` consumes.
//!
//! ## Key Types
//!
//! - [`LogReader`] - paged history and branch-ref reads
//! - [`BranchInfo`] - a local branch head
//! - [`GitError`] - git access failures
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gitscope_git::LogReader;
//!
//! let reader = LogReader::new();
//! let page = reader.page(&repo_path, 0, 200)?;
//! let branches = reader.branches(&repo_path)?;
//! ```
//!
//! Pagination cursors live with the caller; for a fixed repository state the
//! pages are append-only slices of one feed, which is what makes the
//! engine's incremental re-layout valid.

mod branches;
mod log;

pub use branches::BranchInfo;
pub use log::{GitError, LogReader};
