use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the commit feed, supplied newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    /// Ordered parent hashes; index 0 is the mainline parent.
    pub parent_hashes: Vec<String>,
    pub author_name: String,
    pub author_email: String,
    pub date: DateTime<Utc>,
    pub message: String,
}

/// A branch head reference. The target may be a full or abbreviated hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
    pub target: String,
}

/// A commit with its layout coordinates assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitNode {
    pub hash: String,
    pub parent_hashes: Vec<String>,
    /// Children among the loaded commits, in feed order.
    pub child_hashes: Vec<String>,
    /// Row; equals the commit's index in the feed.
    pub y: usize,
    /// Column of the lane that claimed the commit.
    pub x: usize,
    /// Color of the claiming lane; never changes once assigned.
    pub color: String,
    /// Branch names whose head resolved to this commit.
    pub refs: Vec<String>,
}

/// Where a lane ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "row", rename_all = "snake_case")]
pub enum LaneEnd {
    /// Still active at the edge of loaded history.
    Open,
    /// Terminated at this row, either by merging into another lane or at a
    /// root commit.
    Closed(usize),
}

impl LaneEnd {
    pub fn is_open(&self) -> bool {
        matches!(self, LaneEnd::Open)
    }
}

/// A vertical track of the layout claimed by one continuous line of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub column: usize,
    pub start_y: usize,
    pub end: LaneEnd,
    pub color: String,
}

impl Lane {
    /// Whether the lane occupies its column at the given row.
    pub fn is_active_at(&self, row: usize) -> bool {
        self.start_y <= row
            && match self.end {
                LaneEnd::Open => true,
                LaneEnd::Closed(end) => row <= end,
            }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// A terminated lane joining the lane that continues through a commit.
    MergeIn,
    /// A new lane leaving a merge commit towards an additional parent.
    BranchOut,
}

/// Geometry-independent connector descriptor between two lane positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    pub kind: CurveKind,
    pub from_column: usize,
    pub from_y: usize,
    pub to_column: usize,
    pub to_y: usize,
}

/// Why a branch ref is not plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// No loaded commit matches; the target may not be paged in yet.
    NotLoaded,
    /// Several loaded commits match the abbreviated target equally well.
    Ambiguous { candidates: Vec<String> },
}

/// A branch ref that could not be attached to a loaded commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedRef {
    pub name: String,
    pub target: String,
    pub reason: UnresolvedReason,
}

/// Complete layout output consumed by a renderer: immutable value data,
/// no behavior beyond simple accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    /// Laid-out commits in feed order; `nodes[i].y == i`.
    pub nodes: Vec<CommitNode>,
    /// Lanes in opening order, closed and still-open alike.
    pub lanes: Vec<Lane>,
    /// Connector descriptors in row order.
    pub curves: Vec<Curve>,
    /// Refs that are not plotted, with the reason made explicit.
    pub unresolved_refs: Vec<UnresolvedRef>,
}

impl GraphLayout {
    /// Number of columns needed to render the layout.
    pub fn column_count(&self) -> usize {
        self.lanes
            .iter()
            .map(|lane| lane.column + 1)
            .max()
            .unwrap_or(0)
    }
}
