//! Global error handling for treedump
//!
//! Per-file read failures never surface here: they are recorded in the
//! output as error markers. Everything in this module is fatal to a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for treedump operations
#[derive(Error, Debug)]
pub enum DumpError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The output file could not be created or written
    #[error("Cannot write output file {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for treedump operations
pub type Result<T> = std::result::Result<T, DumpError>;

/// Creates a DumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl DumpError {
    /// Wrap an IO failure on the output sink
    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DumpError::Output {
            path: path.into(),
            source,
        }
    }
}

impl From<DumpError> for io::Error {
    fn from(err: DumpError) -> Self {
        match err {
            DumpError::Io(e) => e,
            DumpError::Output { source, .. } => source,
            DumpError::PathNotFound(path) => io::Error::new(
                io::ErrorKind::NotFound,
                format!("Path not found: {}", path),
            ),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
