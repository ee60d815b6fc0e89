//! Error types for tc-serialize.

use thiserror::Error;

use tc_catalogue::CatalogueError;
use tc_render::RenderError;
use tc_router::RouterError;

/// Errors that can occur while writing or reading a snapshot.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("snapshot format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Alias for `Result<T, SerializeError>`.
pub type SerializeResult<T> = Result<T, SerializeError>;
