use thiserror::Error;
use std::io;

/// Custom result type alias for the crate
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors that can terminate a conversion request
///
/// Problems with individual files or directories are never surfaced through
/// this type; they are collected as strings in the run's statistics instead.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// I/O errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// ZIP archive errors
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal errors
    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The output root could not be prepared
    #[error("Output directory error: {0}")]
    OutputRoot(String),

    /// The final archive could not be created
    #[error("Packaging error: {0}")]
    Packaging(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// A background task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),

    /// General message errors
    #[error("{0}")]
    Message(String),
}

impl ConversionError {
    /// Checks if this error ends the whole conversion request
    ///
    /// A caller should mark the request as failed only for terminal errors.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::OutputRoot(_) |
            Self::Packaging(_) |
            Self::Validation(_) |
            Self::Zip(_) |
            Self::Task(_)
        )
    }
}
