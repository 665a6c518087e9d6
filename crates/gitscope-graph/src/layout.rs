use std::collections::HashMap;

use tracing::debug;

use crate::commit::{BranchRef, Commit, CommitNode, GraphLayout, UnresolvedRef};
use crate::curves::resolve_curves;
use crate::error::GraphError;
use crate::indexer::CommitIndex;
use crate::lanes::LaneAllocator;
use crate::palette::Palette;
use crate::refs::assign_refs;

/// Incremental layout over an append-only, newest-first commit feed.
///
/// Holds the accumulated feed together with the lane state left at the
/// window boundary, so appending an older page continues where the previous
/// computation stopped instead of starting over. Extending is observably
/// identical to a full recompute over the concatenated feed.
#[derive(Debug, Clone)]
pub struct LayoutState {
    commits: Vec<Commit>,
    refs: Vec<BranchRef>,
    current_branch: Option<String>,
    palette: Palette,
    index: CommitIndex,
    alloc: LaneAllocator,
    nodes: Vec<CommitNode>,
    assigned_refs: HashMap<String, Vec<String>>,
    unresolved: Vec<UnresolvedRef>,
}

impl LayoutState {
    pub fn new(refs: Vec<BranchRef>, current_branch: Option<String>) -> Self {
        Self::with_palette(refs, current_branch, Palette::default())
    }

    pub fn with_palette(
        refs: Vec<BranchRef>,
        current_branch: Option<String>,
        palette: Palette,
    ) -> Self {
        Self {
            commits: Vec::new(),
            refs,
            current_branch,
            palette,
            index: CommitIndex::new(),
            alloc: LaneAllocator::new(),
            nodes: Vec::new(),
            assigned_refs: HashMap::new(),
            unresolved: Vec::new(),
        }
    }

    /// Append a page of strictly older commits and lay them out.
    ///
    /// Fails only on a duplicate hash; dangling parents simply leave their
    /// lane open until more history is paged in.
    pub fn extend(&mut self, page: &[Commit]) -> Result<(), GraphError> {
        self.index.append(page)?;
        self.commits.extend(page.iter().cloned());

        // Re-resolve refs over the grown window: a new page can change the
        // outcome for rows that are already laid out (fresh prefix collision,
        // or a longer match). When that happens the boundary seed is stale
        // and the whole feed is recomputed instead of silently diverging
        // from the full-recompute path.
        let (assigned, unresolved) = assign_refs(&self.refs, &self.index);
        let laid_out = self.nodes.len();
        let prefix_changed = self.nodes.iter().any(|node| {
            assigned.get(&node.hash).map(Vec::as_slice).unwrap_or(&[]) != node.refs.as_slice()
        });
        self.assigned_refs = assigned;
        self.unresolved = unresolved;

        if prefix_changed {
            debug!(
                rows = laid_out,
                "Ref resolution changed for laid-out rows, recomputing layout"
            );
            self.alloc = LaneAllocator::new();
            self.nodes.clear();
            self.place_rows(0);
        } else {
            self.place_rows(laid_out);
        }

        debug!(
            commits = self.commits.len(),
            lanes = self.alloc.lanes().len(),
            "Extended layout"
        );

        Ok(())
    }

    fn place_rows(&mut self, from: usize) {
        for y in from..self.commits.len() {
            let commit = &self.commits[y];
            let refs = self
                .assigned_refs
                .get(&commit.hash)
                .cloned()
                .unwrap_or_default();
            let (x, color) = self.alloc.place(
                y,
                &commit.hash,
                &commit.parent_hashes,
                &refs,
                self.current_branch.as_deref(),
                &self.palette,
            );
            self.nodes.push(CommitNode {
                hash: commit.hash.clone(),
                parent_hashes: commit.parent_hashes.clone(),
                child_hashes: self.index.children_of(&commit.hash).to_vec(),
                y,
                x,
                color,
                refs,
            });
        }
    }

    /// Snapshot the layout output for the renderer.
    pub fn layout(&self) -> GraphLayout {
        GraphLayout {
            nodes: self.nodes.clone(),
            lanes: self.alloc.lanes().to_vec(),
            curves: resolve_curves(self.alloc.transitions()),
            unresolved_refs: self.unresolved.clone(),
        }
    }

    /// The accumulated feed, newest first.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// One-shot layout of a complete feed.
pub fn layout(
    commits: &[Commit],
    refs: &[BranchRef],
    current_branch: Option<&str>,
) -> Result<GraphLayout, GraphError> {
    let mut state = LayoutState::new(refs.to_vec(), current_branch.map(str::to_string));
    state.extend(commits)?;
    Ok(state.layout())
}
