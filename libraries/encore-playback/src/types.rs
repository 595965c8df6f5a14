//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random track ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A playable item: display metadata plus an opaque source locator
///
/// Immutable once created. The locator is only interpreted by the bound
/// [`TrackSource`](crate::TrackSource); the controller passes it through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    id: TrackId,
    title: String,
    artist: String,
    locator: String,
}

impl Track {
    /// Create a track with a freshly generated ID
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self::with_id(TrackId::generate(), title, artist, locator)
    }

    /// Create a track with a caller-provided ID
    pub fn with_id(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            locator: locator.into(),
        }
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Source locator (path, URI, ...) handed to the track source on load
    pub fn locator(&self) -> &str {
        &self.locator
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Initial state; also entered by `stop()`
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => write!(f, "stopped"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum number of undrained events kept (default: 256).
    /// Oldest events are dropped first once the limit is hit.
    pub max_pending_events: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            max_pending_events: 256,
        }
    }
}
