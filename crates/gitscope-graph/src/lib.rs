//! # gitscope-graph
//!
//! Commit-graph layout engine for gitscope.
//!
//! Turns an ordered, newest-first commit feed and a table of branch heads
//! into a 2D lane diagram: a column and row for every commit, a stable color
//! per lane, and connector descriptors for merges and branch points.
//!
//! ## Key Types
//!
//! - [`LayoutState`] - incremental layout over an append-only feed
//! - [`GraphLayout`] - per-commit coordinates, lanes and curves
//! - [`Commit`] / [`CommitNode`] - feed item and laid-out node
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gitscope_graph::{layout, BranchRef, Commit};
//!
//! let graph = layout(&commits, &branch_refs, Some("main"))?;
//! for node in &graph.nodes {
//!     println!("{} at column {} row {}", node.hash, node.x, node.y);
//! }
//! ```
//!
//! The layout is a pure, synchronous function of the feed, the branch refs
//! and the lane state left at the previous window boundary; it performs no
//! I/O. Appending an older page through [`LayoutState::extend`] produces
//! exactly the layout a full recompute over the concatenated feed would.

mod commit;
mod curves;
mod error;
mod indexer;
mod lanes;
mod layout;
mod palette;
mod refs;

pub use commit::{
    BranchRef, Commit, CommitNode, Curve, CurveKind, GraphLayout, Lane, LaneEnd, UnresolvedReason,
    UnresolvedRef,
};
pub use error::GraphError;
pub use indexer::CommitIndex;
pub use layout::{layout, LayoutState};
pub use palette::Palette;
pub use refs::{assign_refs, resolve_target, RefResolution};
