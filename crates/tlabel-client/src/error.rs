use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid attribute name: {0:?}")]
    InvalidName(String),

    #[error("attribute '{name}' rejected by target: {reason}")]
    Rejected { name: String, reason: String },
}
