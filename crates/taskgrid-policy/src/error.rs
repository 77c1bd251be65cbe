//! Policy crate error types.
//!
//! Scheduling passes never fail; these cover registry lookups and
//! configuration/snapshot loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("unknown scheduler policy: {0}")]
    UnknownPolicy(String),

    #[error("job {job} references undeclared node: {node}")]
    UnknownNode { job: String, node: String },

    #[error("node declared more than once: {0}")]
    DuplicateNode(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
