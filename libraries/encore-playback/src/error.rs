//! Error types for playback control

use thiserror::Error;

/// Which end of the queue a navigation request ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// `previous()` at the first track (or with no cursor)
    Start,

    /// `next()` at the last track
    End,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Start => write!(f, "already at start"),
            Boundary::End => write!(f, "end of queue reached"),
        }
    }
}

/// Playback errors
///
/// Every variant is recoverable: the controller's queue, cursor and state
/// are left consistent whenever one of these is returned.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty, nothing to play
    #[error("Nothing to play: queue is empty")]
    EmptyQueue,

    /// Index out of bounds
    #[error("Index {index} out of range for queue of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Navigation ran past either end of the queue
    #[error("Queue boundary: {0}")]
    QueueBoundary(Boundary),

    /// The bound track source rejected a transport command
    #[error("Track source '{source_name}' unavailable: {reason}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        reason: SourceError,
    },
}

/// Errors reported by a [`TrackSource`](crate::TrackSource) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Locator cannot be resolved by this backend
    #[error("Invalid locator '{locator}': {message}")]
    InvalidLocator { locator: String, message: String },

    /// Locator uses a scheme this backend does not handle
    #[error("Unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    /// Transport command issued before any track was loaded
    #[error("No track loaded")]
    NotLoaded,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Result type for track source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;
