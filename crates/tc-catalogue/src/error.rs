//! Catalogue error type.

use thiserror::Error;

/// Errors produced while loading the catalogue.
///
/// Query-time misses are never errors; lookups return `Option`.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("unknown stop {0:?}")]
    UnknownStop(String),

    #[error("stop {0:?} already exists")]
    DuplicateStop(String),

    #[error("bus {0:?} already exists")]
    DuplicateBus(String),

    #[error("too many {0} for 32-bit ids")]
    CapacityExceeded(&'static str),
}

pub type CatalogueResult<T> = Result<T, CatalogueError>;
