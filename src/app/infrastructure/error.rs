use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No active document")]
    NoActiveDocument,

    #[error("Nothing to pick from: the {0} bank is empty")]
    EmptyBank(&'static str),

    #[error("Not a valid haiku (line sizes {counts:?})")]
    InvalidHaiku { counts: [usize; 3] },

    #[error("Could not delete {filename}: {source}")]
    DeleteFailed {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed session file: {0}")]
    MalformedSession(String),

    #[error("Action not allowed right now: {0}")]
    InvalidState(&'static str),

    #[error("Invalid note filename: {0:?}")]
    InvalidFilename(String),

    #[error("Timer must run between 1 and {max} minutes")]
    InvalidDuration { max: u32 },
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
