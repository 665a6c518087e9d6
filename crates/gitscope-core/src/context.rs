use std::path::{Path, PathBuf};

use tracing::{debug, info};

use gitscope_git::{BranchInfo, LogReader};
use gitscope_graph::{Commit, GraphLayout, LayoutState, Palette};

use crate::error::ContextError;

/// State owned per repository: the accumulated commit feed and its layout.
///
/// Exactly one writer exists by construction: pages are appended on the
/// caller's thread, and a repository or branch switch discards the state
/// wholesale before anything new is computed. Stale partial results are
/// never merged into a freshly selected repository's state.
pub struct RepoContext {
    repo_path: PathBuf,
    page_size: usize,
    reader: LogReader,
    palette: Palette,
    branches: Vec<BranchInfo>,
    current_branch: Option<String>,
    state: LayoutState,
    pages_loaded: usize,
    exhausted: bool,
}

impl RepoContext {
    /// Open a context for a repository, reading its branch-ref table.
    /// No history is loaded until [`RepoContext::load_next_page`].
    pub fn open(repo_path: PathBuf, page_size: usize) -> Result<Self, ContextError> {
        Self::open_with(repo_path, page_size, LogReader::new(), Palette::default())
    }

    pub fn open_with(
        repo_path: PathBuf,
        page_size: usize,
        reader: LogReader,
        palette: Palette,
    ) -> Result<Self, ContextError> {
        let branches = reader.branches(&repo_path)?;
        let current_branch = reader.current_branch(&repo_path)?;
        let refs = branches.iter().map(BranchInfo::to_ref).collect();
        let state = LayoutState::with_palette(refs, current_branch.clone(), palette.clone());

        info!(
            path = %repo_path.display(),
            branches = branches.len(),
            "Opened repository context"
        );

        Ok(Self {
            repo_path,
            page_size,
            reader,
            palette,
            branches,
            current_branch,
            state,
            pages_loaded: 0,
            exhausted: false,
        })
    }

    /// Fetch the next (older) page of history and extend the layout.
    /// Returns the number of commits appended; 0 once history is exhausted.
    pub fn load_next_page(&mut self) -> Result<usize, ContextError> {
        if self.exhausted {
            return Ok(0);
        }

        let offset = self.state.len();
        let page = self.reader.page(&self.repo_path, offset, self.page_size)?;
        if page.len() < self.page_size {
            self.exhausted = true;
        }
        if page.is_empty() {
            return Ok(0);
        }

        self.state.extend(&page)?;
        self.pages_loaded += 1;

        debug!(
            page = self.pages_loaded,
            commits = page.len(),
            total = self.state.len(),
            "Loaded history page"
        );

        Ok(page.len())
    }

    /// Page history in until it is exhausted or `max` commits are loaded.
    /// Returns the total number of loaded commits.
    pub fn load_history(&mut self, max: Option<usize>) -> Result<usize, ContextError> {
        loop {
            if self.exhausted {
                break;
            }
            if max.is_some_and(|max| self.state.len() >= max) {
                break;
            }
            if self.load_next_page()? == 0 {
                break;
            }
        }
        Ok(self.state.len())
    }

    /// Point the context at another repository. All accumulated commit and
    /// lane state is discarded, never carried over.
    pub fn switch_repository(&mut self, repo_path: PathBuf) -> Result<(), ContextError> {
        debug!(
            from = %self.repo_path.display(),
            to = %repo_path.display(),
            "Switching repository, discarding state"
        );
        *self = Self::open_with(
            repo_path,
            self.page_size,
            self.reader.clone(),
            self.palette.clone(),
        )?;
        Ok(())
    }

    /// Rebuild from empty after the checked-out branch (or the repository
    /// itself) changed underneath us. Discards, never patches.
    pub fn refresh(&mut self) -> Result<(), ContextError> {
        let repo_path = self.repo_path.clone();
        self.switch_repository(repo_path)
    }

    /// Snapshot the current layout output.
    pub fn layout(&self) -> GraphLayout {
        self.state.layout()
    }

    /// The accumulated feed, newest first.
    pub fn commits(&self) -> &[Commit] {
        self.state.commits()
    }

    pub fn loaded(&self) -> usize {
        self.state.len()
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn branches(&self) -> &[BranchInfo] {
        &self.branches
    }

    pub fn current_branch(&self) -> Option<&str> {
        self.current_branch.as_deref()
    }
}
