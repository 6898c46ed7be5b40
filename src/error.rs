//! Errors raised while constructing or loading proof DAGs

use crate::core::NodeId;
use thiserror::Error;

/// Errors raised while constructing or loading a [`Dag`](crate::Dag)
#[derive(Debug, Error)]
pub enum DagError {
    #[error("Duplicate node '{0}'")]
    DuplicateNode(NodeId),

    #[error("Leaf '{0}' is not a node")]
    LeafNotANode(NodeId),

    #[error("Malformed proof DAG JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for DAG construction
pub type DagResult<T> = std::result::Result<T, DagError>;
