use thiserror::Error;

use crate::graph::VertexId;

/// Errors returned by graph operations and shortest-path analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A vertex value passed to an operation is not part of the graph.
    #[error("vertex not found in graph")]
    VertexNotFound,

    /// A dense vertex id is out of range for the graph it was used with.
    #[error("vertex id {0} is out of range")]
    UnknownVertexId(VertexId),

    /// The all-pairs matrix would exceed the configured vertex cap.
    #[error("graph has {vertices} vertices, all-pairs analysis is limited to {limit}")]
    VertexLimitExceeded { vertices: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
