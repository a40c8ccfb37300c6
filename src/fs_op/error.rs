use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the filesystem helpers and by `AbsPath` operations.
#[derive(Error, Debug)]
pub enum FsOpError {
    /// Wrapper for underlying IO errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context message.
    #[error("Filesystem operation failed: {0}")]
    Message(String),

    /// Contextual error that includes source and destination paths.
    #[error("Operation failed from `{src}` to `{dst}`: {msg}")]
    PathContext {
        src: PathBuf,
        dst: PathBuf,
        msg: String,
    },

    /// A replacement file name was empty or was not a single path component.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// A move was requested without a destination.
    #[error("no destination given")]
    MissingDestination,

    /// Source and destination of a copy denote the same entry.
    #[error("`{0}` and its destination are the same file")]
    SameFile(PathBuf),

    /// The destination of a tree copy is already occupied.
    #[error("already exists: `{0}`")]
    AlreadyExists(PathBuf),

    /// A copy or move reported success but nothing is at the expected location.
    #[error("operation did not produce `{expected}`")]
    DestinationMismatch { expected: PathBuf },

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("could not serialize settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),

    #[error("could not initialise logging: {0}")]
    Logging(String),
}

impl From<String> for FsOpError {
    fn from(s: String) -> Self {
        FsOpError::Message(s)
    }
}

/// Result alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, FsOpError>;
