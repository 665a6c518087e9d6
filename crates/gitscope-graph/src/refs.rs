use std::collections::HashMap;

use tracing::debug;

use crate::commit::{BranchRef, UnresolvedReason, UnresolvedRef};
use crate::indexer::CommitIndex;

/// Outcome of resolving one ref target against the loaded window.
#[derive(Debug, Clone, PartialEq)]
pub enum RefResolution {
    /// Exactly one loaded commit matches best.
    Unique(String),
    /// No loaded commit matches; the target may simply not be paged in yet.
    NotLoaded,
    /// Several loaded commits match equally well. Never guessed at.
    Ambiguous(Vec<String>),
}

/// Resolve a full or abbreviated hash against the loaded commits.
///
/// A candidate shares a prefix with the target in either direction; the
/// longest common prefix wins, and a tie between distinct candidates is
/// surfaced as ambiguous.
pub fn resolve_target(target: &str, index: &CommitIndex) -> RefResolution {
    if target.is_empty() {
        return RefResolution::NotLoaded;
    }

    let mut best: Vec<&str> = Vec::new();
    let mut best_len = 0usize;
    for hash in index.hashes() {
        let common = if hash.starts_with(target) {
            target.len()
        } else if target.starts_with(hash) {
            hash.len()
        } else {
            continue;
        };

        if common > best_len {
            best_len = common;
            best.clear();
            best.push(hash);
        } else if common == best_len {
            best.push(hash);
        }
    }

    match best.len() {
        0 => RefResolution::NotLoaded,
        1 => RefResolution::Unique(best[0].to_string()),
        _ => {
            // Sorted so the outcome does not depend on index iteration order.
            let mut candidates: Vec<String> = best.into_iter().map(str::to_string).collect();
            candidates.sort();
            RefResolution::Ambiguous(candidates)
        }
    }
}

/// Attach a branch-ref table to loaded commits.
///
/// Returns ref names per commit hash (in table order) plus the refs that are
/// not plotted, with the reason made explicit rather than guessed away.
pub fn assign_refs(
    table: &[BranchRef],
    index: &CommitIndex,
) -> (HashMap<String, Vec<String>>, Vec<UnresolvedRef>) {
    let mut assigned: HashMap<String, Vec<String>> = HashMap::new();
    let mut unresolved: Vec<UnresolvedRef> = Vec::new();

    for branch in table {
        match resolve_target(&branch.target, index) {
            RefResolution::Unique(hash) => {
                assigned.entry(hash).or_default().push(branch.name.clone());
            }
            RefResolution::NotLoaded => {
                unresolved.push(UnresolvedRef {
                    name: branch.name.clone(),
                    target: branch.target.clone(),
                    reason: UnresolvedReason::NotLoaded,
                });
            }
            RefResolution::Ambiguous(candidates) => {
                debug!(
                    ref_name = %branch.name,
                    candidates = candidates.len(),
                    "Ambiguous ref target, not plotting"
                );
                unresolved.push(UnresolvedRef {
                    name: branch.name.clone(),
                    target: branch.target.clone(),
                    reason: UnresolvedReason::Ambiguous { candidates },
                });
            }
        }
    }

    (assigned, unresolved)
}
