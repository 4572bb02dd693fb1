use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtelierError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AtelierResult<T> = Result<T, AtelierError>;
