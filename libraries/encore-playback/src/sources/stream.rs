//! Remote streaming track source
//!
//! Locators are `http`/`https` URLs. The title comes from the last path
//! segment (percent-decoded, extension stripped) and the artist from the
//! host. No connection is ever opened.

use tracing::{debug, info};
use url::Url;

use super::TransportStatus;
use crate::error::{SourceError, SourceResult};
use crate::source::TrackSource;
use crate::types::{Track, TrackId};

/// Track source for remote streams
#[derive(Debug, Default)]
pub struct StreamingSource {
    loaded: Option<Track>,
    url: Option<Url>,
    status: TransportStatus,
}

impl StreamingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transport status
    pub fn status(&self) -> TransportStatus {
        self.status
    }

    /// URL of the loaded stream
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn parse(locator: &str) -> SourceResult<Url> {
        let url = Url::parse(locator.trim()).map_err(|e| SourceError::InvalidLocator {
            locator: locator.to_string(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SourceError::UnsupportedScheme(other.to_string())),
        }
    }

    fn describe(locator: &str, url: &Url) -> Track {
        let host = url.host_str().unwrap_or("stream").to_string();

        let title = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(|segment| {
                let decoded = urlencoding::decode(segment)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| segment.to_string());
                match decoded.rsplit_once('.') {
                    Some((stem, _)) if !stem.is_empty() => stem.to_string(),
                    _ => decoded,
                }
            })
            .unwrap_or_else(|| host.clone());

        Track::with_id(TrackId::new(locator), title, host, locator)
    }

    fn require_loaded(&self) -> SourceResult<&Track> {
        self.loaded.as_ref().ok_or(SourceError::NotLoaded)
    }
}

impl TrackSource for StreamingSource {
    fn name(&self) -> &str {
        "stream"
    }

    fn load_track(&mut self, locator: &str) -> SourceResult<()> {
        let url = Self::parse(locator)?;
        let track = Self::describe(locator, &url);

        info!("[stream] Buffering '{}' from {}", track.title(), url);

        self.loaded = Some(track);
        self.url = Some(url);
        self.status = TransportStatus::Loaded;
        Ok(())
    }

    fn play(&mut self) -> SourceResult<()> {
        let track = self.require_loaded()?;
        info!("[stream] Streaming '{}'", track.title());
        self.status = TransportStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> SourceResult<()> {
        debug!("[stream] Pause (status was {:?})", self.status);
        if self.loaded.is_some() {
            self.status = TransportStatus::Paused;
        }
        Ok(())
    }

    fn stop(&mut self) -> SourceResult<()> {
        debug!("[stream] Stop (status was {:?})", self.status);
        if self.loaded.is_some() {
            self.status = TransportStatus::Stopped;
        }
        Ok(())
    }

    fn current_track(&self) -> Option<Track> {
        self.loaded.clone()
    }
}
