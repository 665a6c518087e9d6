//! # gitscope-core
//!
//! Repository context for gitscope.
//!
//! Ties the history reader and the layout engine together: one
//! [`RepoContext`] per repository owns the accumulated commit feed and its
//! incrementally-extended layout. A repository or branch switch discards the
//! context's state entirely before a fresh layout is computed - discard,
//! don't merge.
//!
//! ## Key Types
//!
//! - [`RepoContext`] - accumulated feed + layout for one repository
//! - [`ContextError`] - aggregated git/layout failures

mod context;
mod error;

pub use context::RepoContext;
pub use error::ContextError;
