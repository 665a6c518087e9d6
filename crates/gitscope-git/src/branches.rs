use serde::{Deserialize, Serialize};

use gitscope_graph::BranchRef;

/// A local branch and the commit its head points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub name: String,
    /// Full hash of the branch head.
    pub target: String,
    /// Whether HEAD currently points at this branch.
    pub is_head: bool,
}

impl BranchInfo {
    /// The ref-table entry the layout engine consumes.
    pub fn to_ref(&self) -> BranchRef {
        BranchRef {
            name: self.name.clone(),
            target: self.target.clone(),
        }
    }
}
