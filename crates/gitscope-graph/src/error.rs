use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    /// The feed provider must guarantee hash uniqueness; a duplicate means an
    /// upstream contract violation, not a recoverable layout condition.
    #[error("duplicate commit hash in feed: {0}")]
    DuplicateHash(String),
}
