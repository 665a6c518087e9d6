use std::collections::{HashMap, HashSet};

use crate::commit::Commit;
use crate::error::GraphError;

/// Row assignments and hash indexes derived from the ordered feed.
///
/// Rows are feed positions: the newest commit is row 0 and rows grow
/// monotonically as older pages are appended. Children are registered under
/// each parent hash whether or not that parent is loaded yet, so a commit
/// paged in later finds its children already recorded.
#[derive(Debug, Clone, Default)]
pub struct CommitIndex {
    rows: HashMap<String, usize>,
    children: HashMap<String, Vec<String>>,
    len: usize,
}

impl CommitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a complete feed in one pass.
    pub fn build(commits: &[Commit]) -> Result<Self, GraphError> {
        let mut index = Self::new();
        index.append(commits)?;
        Ok(index)
    }

    /// Register a page of commits appended to the feed. Rows continue from
    /// the current feed length.
    ///
    /// A hash already present in the window (or repeated within the page) is
    /// rejected before any mutation, leaving the index untouched.
    pub fn append(&mut self, commits: &[Commit]) -> Result<(), GraphError> {
        let mut page_hashes: HashSet<&str> = HashSet::with_capacity(commits.len());
        for commit in commits {
            if self.rows.contains_key(&commit.hash) || !page_hashes.insert(commit.hash.as_str()) {
                return Err(GraphError::DuplicateHash(commit.hash.clone()));
            }
        }

        for commit in commits {
            self.rows.insert(commit.hash.clone(), self.len);
            self.len += 1;
            for parent in &commit.parent_hashes {
                self.children
                    .entry(parent.clone())
                    .or_default()
                    .push(commit.hash.clone());
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Row of a loaded commit, if the hash is in the window.
    pub fn row_of(&self, hash: &str) -> Option<usize> {
        self.rows.get(hash).copied()
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.rows.contains_key(hash)
    }

    /// Children of a commit restricted to the loaded window, in feed order.
    /// A missing parent is a valid condition and yields no entry here.
    pub fn children_of(&self, hash: &str) -> &[String] {
        self.children.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All loaded hashes, in no particular order.
    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }
}
