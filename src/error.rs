use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors raised before any script text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Unsupported script format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Validation(String),
}

impl GenerateError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
