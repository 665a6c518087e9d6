use chrono::{DateTime, Utc};
use git2::{ErrorCode, Repository, Sort};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use gitscope_graph::Commit;

use crate::BranchInfo;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepo(String),

    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),
}

/// Reads the commit feed and branch-ref table a graph layout consumes.
///
/// Pages are reverse-chronological and append-only: for a fixed repository
/// state, `page(offset, limit)` slices one gap-free, reordering-free feed.
#[derive(Debug, Clone)]
pub struct LogReader {
    /// Walk all local branches, not just HEAD.
    all_branches: bool,
}

impl Default for LogReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LogReader {
    pub fn new() -> Self {
        Self { all_branches: true }
    }

    pub fn with_all_branches(mut self, all: bool) -> Self {
        self.all_branches = all;
        self
    }

    /// Read one page of history starting `offset` commits below the newest.
    ///
    /// A repository with no commits yet yields an empty page, not an error.
    pub fn page(&self, repo_path: &Path, offset: usize, limit: usize) -> Result<Vec<Commit>, GitError> {
        let repo = self.open(repo_path)?;

        let mut walk = repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        if self.all_branches {
            walk.push_glob("refs/heads/*")?;
        }
        match walk.push_head() {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                if !self.all_branches {
                    return Ok(Vec::new());
                }
            }
            Err(e) => return Err(e.into()),
        }

        let mut commits = Vec::with_capacity(limit);
        for oid in walk.skip(offset).take(limit) {
            let commit = repo.find_commit(oid?)?;
            commits.push(to_feed_commit(&commit));
        }

        debug!(offset, count = commits.len(), "Read history page");

        Ok(commits)
    }

    /// List local branches with their head hashes, sorted by name.
    pub fn branches(&self, repo_path: &Path) -> Result<Vec<BranchInfo>, GitError> {
        let repo = self.open(repo_path)?;

        let mut branches = Vec::new();
        for entry in repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = entry?;
            let name = match branch.name()? {
                Some(name) => name.to_string(),
                None => continue,
            };
            let target = match branch.get().target() {
                Some(oid) => oid.to_string(),
                None => continue,
            };
            let is_head = branch.is_head();
            branches.push(BranchInfo {
                name,
                target,
                is_head,
            });
        }
        branches.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = branches.len(), "Listed local branches");

        Ok(branches)
    }

    /// Name of the currently checked-out branch; `None` when HEAD is
    /// detached or the branch is unborn.
    pub fn current_branch(&self, repo_path: &Path) -> Result<Option<String>, GitError> {
        let repo = self.open(repo_path)?;

        let result = match repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(e.into()),
        };
        result
    }

    fn open(&self, repo_path: &Path) -> Result<Repository, GitError> {
        Repository::discover(repo_path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::NotARepo(repo_path.display().to_string())
            } else {
                GitError::GitOperationFailed(e)
            }
        })
    }
}

fn to_feed_commit(commit: &git2::Commit<'_>) -> Commit {
    let author = commit.author();
    Commit {
        hash: commit.id().to_string(),
        parent_hashes: commit.parent_ids().map(|id| id.to_string()).collect(),
        author_name: author.name().unwrap_or("").to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        // Out-of-range timestamps clamp to the epoch.
        date: DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0).unwrap_or_default(),
        message: commit.summary().unwrap_or("").to_string(),
    }
}
