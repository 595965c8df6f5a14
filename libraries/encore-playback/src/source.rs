//! Backend-agnostic track source trait
//!
//! Abstracts transport for different backends (local files, remote streams, ...)

use crate::error::SourceResult;
use crate::types::Track;

/// Backend that performs the actual transport for the controller
///
/// The controller only ever calls these methods; it never inspects
/// backend-specific state and never downcasts. Implementations can be
/// swapped at runtime with
/// [`PlaybackController::set_source`](crate::PlaybackController::set_source).
pub trait TrackSource: Send {
    /// Short backend name used in logs and errors
    fn name(&self) -> &str;

    /// Resolve `locator` and make it the loaded track
    ///
    /// # Returns
    /// * `Ok(())` - Track loaded, ready for `play()`
    /// * `Err(_)` - Locator cannot be handled by this backend
    fn load_track(&mut self, locator: &str) -> SourceResult<()>;

    /// Start (or resume) transport of the loaded track
    fn play(&mut self) -> SourceResult<()>;

    /// Pause transport
    ///
    /// Must succeed with nothing loaded; the controller pauses unconditionally.
    fn pause(&mut self) -> SourceResult<()>;

    /// Stop transport
    fn stop(&mut self) -> SourceResult<()>;

    /// Metadata of the loaded track, if any
    fn current_track(&self) -> Option<Track>;
}

impl std::fmt::Debug for dyn TrackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackSource")
            .field("name", &self.name())
            .finish()
    }
}
