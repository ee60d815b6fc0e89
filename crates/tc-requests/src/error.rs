use thiserror::Error;

use tc_catalogue::CatalogueError;
use tc_render::RenderError;
use tc_router::RouterError;
use tc_serialize::SerializeError;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input document has no {0:?} section")]
    MissingSection(&'static str),

    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    #[error("router error: {0}")]
    Router(#[from] RouterError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SerializeError),
}

pub type RequestResult<T> = Result<T, RequestError>;
