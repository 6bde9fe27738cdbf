use thiserror::Error;

use tlabel_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("snapshot delivery via '{sink}' failed: {reason}")]
    Delivery { sink: &'static str, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
