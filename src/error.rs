//! Unified error handling for the sammiewalk library.
//!
//! Only the fallible edges of the crate surface these: explicit storage
//! calls, GPX reading and configuration parsing. Favorites loading and the
//! automatic persist after a toggle recover locally and log instead.

use thiserror::Error;

/// Unified error type for sammiewalk operations.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Key-value store could not be read or written
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Value could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// GPX document could not be parsed
    #[error("GPX error: {message}")]
    Gpx { message: String },

    /// GPX document parsed but held no points
    #[error("GPX document contains no track, route or waypoint points")]
    EmptyTrack,

    /// Text value is not one of the accepted names
    #[error("Parse error: unknown {kind} '{value}'")]
    Parse { kind: &'static str, value: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WalkError {
    pub(crate) fn storage(message: impl Into<String>) -> Self {
        WalkError::Storage {
            message: message.into(),
        }
    }
}

#[cfg(feature = "persistence")]
impl From<rusqlite::Error> for WalkError {
    fn from(err: rusqlite::Error) -> Self {
        WalkError::storage(err.to_string())
    }
}

/// Result type alias for sammiewalk operations.
pub type Result<T> = std::result::Result<T, WalkError>;
