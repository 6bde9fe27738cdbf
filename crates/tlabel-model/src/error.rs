use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
