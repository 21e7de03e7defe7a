use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("No subscription at position {}", .0 + 1)]
    NotFound(usize),

    #[error("Could not open browser: {0}")]
    Browser(String),
}

impl From<serde_json::Error> for SubError {
    fn from(e: serde_json::Error) -> Self {
        SubError::Format(e.to_string())
    }
}

impl From<tempfile::PersistError> for SubError {
    fn from(e: tempfile::PersistError) -> Self {
        SubError::Io(e.error)
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, SubError>;
