//! Routing-subsystem error type.

use thiserror::Error;

use tc_core::StopId;

/// Errors produced by `tc-router`.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: StopId, to: StopId },

    #[error("stop {0} is not a vertex of the routing graph")]
    VertexNotFound(StopId),

    #[error("routing graph arrays are inconsistent")]
    MalformedGraph,

    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),
}

pub type RouterResult<T> = Result<T, RouterError>;
