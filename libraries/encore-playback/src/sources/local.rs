//! Local file track source
//!
//! Locators are filesystem paths or `file://` URLs. Metadata is taken from
//! the file stem: `"Artist - Title.ext"` yields both fields, anything else
//! is used as the title with an unknown artist.
//!
//! The file itself is never opened.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use super::TransportStatus;
use crate::error::{SourceError, SourceResult};
use crate::source::TrackSource;
use crate::types::{Track, TrackId};

/// Artist reported when the file name carries none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Track source for files on local disk
#[derive(Debug, Default)]
pub struct LocalFileSource {
    loaded: Option<Track>,
    path: Option<PathBuf>,
    status: TransportStatus,
}

impl LocalFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transport status
    pub fn status(&self) -> TransportStatus {
        self.status
    }

    /// Path of the loaded file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Turn a locator into a path
    ///
    /// Accepts plain paths and `file://` URLs; every other URL scheme is
    /// rejected.
    fn resolve_path(locator: &str) -> SourceResult<PathBuf> {
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(SourceError::InvalidLocator {
                locator: locator.to_string(),
                message: "empty path".to_string(),
            });
        }

        // Windows drive letters ("C:\...") parse as a one-letter scheme
        match Url::parse(trimmed) {
            Ok(url) if url.scheme() == "file" => {
                url.to_file_path().map_err(|()| SourceError::InvalidLocator {
                    locator: locator.to_string(),
                    message: "not a valid file URL".to_string(),
                })
            }
            Ok(url) if url.scheme().len() > 1 => {
                Err(SourceError::UnsupportedScheme(url.scheme().to_string()))
            }
            _ => Ok(PathBuf::from(trimmed)),
        }
    }

    /// Build track metadata from a path
    fn describe(locator: &str, path: &Path) -> SourceResult<Track> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SourceError::InvalidLocator {
                locator: locator.to_string(),
                message: "path has no file name".to_string(),
            })?;

        let (artist, title) = match stem.split_once(" - ") {
            Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => {
                (artist.trim(), title.trim())
            }
            _ => (UNKNOWN_ARTIST, stem),
        };

        Ok(Track::with_id(TrackId::new(locator), title, artist, locator))
    }

    fn require_loaded(&self) -> SourceResult<&Track> {
        self.loaded.as_ref().ok_or(SourceError::NotLoaded)
    }
}

impl TrackSource for LocalFileSource {
    fn name(&self) -> &str {
        "local"
    }

    fn load_track(&mut self, locator: &str) -> SourceResult<()> {
        let path = Self::resolve_path(locator)?;
        let track = Self::describe(locator, &path)?;

        info!(
            "[local] Loading '{}' by {} from {}",
            track.title(),
            track.artist(),
            path.display()
        );

        self.loaded = Some(track);
        self.path = Some(path);
        self.status = TransportStatus::Loaded;
        Ok(())
    }

    fn play(&mut self) -> SourceResult<()> {
        let track = self.require_loaded()?;
        info!("[local] Playing '{}'", track.title());
        self.status = TransportStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> SourceResult<()> {
        debug!("[local] Pause (status was {:?})", self.status);
        if self.loaded.is_some() {
            self.status = TransportStatus::Paused;
        }
        Ok(())
    }

    fn stop(&mut self) -> SourceResult<()> {
        debug!("[local] Stop (status was {:?})", self.status);
        if self.loaded.is_some() {
            self.status = TransportStatus::Stopped;
        }
        Ok(())
    }

    fn current_track(&self) -> Option<Track> {
        self.loaded.clone()
    }
}
