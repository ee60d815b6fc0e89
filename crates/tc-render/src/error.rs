use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render settings: {0}")]
    InvalidSettings(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
