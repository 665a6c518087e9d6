use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Git error: {0}")]
    Git(#[from] gitscope_git::GitError),

    #[error("Layout error: {0}")]
    Layout(#[from] gitscope_graph::GraphError),
}
