//! Shared controller handle
//!
//! One controller, many callers. Every operation runs under a single lock
//! so queue, cursor and state always change together.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    controller::PlaybackController,
    error::Result,
    events::{PlaybackEvent, StateSubscription},
    source::TrackSource,
    types::{PlaybackState, Track},
};

/// Cloneable handle to one [`PlaybackController`]
///
/// Clones refer to the same controller.
#[derive(Debug, Clone)]
pub struct SharedController {
    inner: Arc<Mutex<PlaybackController>>,
}

impl SharedController {
    pub fn new(controller: PlaybackController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the controller
    ///
    /// Use this to group several operations into one atomic step.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackController) -> R) -> R {
        f(&mut self.lock())
    }

    // Every controller operation leaves the queue/cursor/state invariants
    // intact before it can panic, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, PlaybackController> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_source(&self, source: Box<dyn TrackSource>) -> Box<dyn TrackSource> {
        self.lock().set_source(source)
    }

    pub fn add_to_queue(&self, track: Track) {
        self.lock().add_to_queue(track);
    }

    pub fn remove_from_queue(&self, index: usize) -> Option<Track> {
        self.lock().remove_from_queue(index)
    }

    pub fn move_in_queue(&self, from: usize, to: usize) -> bool {
        self.lock().move_in_queue(from, to)
    }

    pub fn play(&self) -> Result<()> {
        self.lock().play()
    }

    pub fn pause(&self) -> Result<()> {
        self.lock().pause()
    }

    pub fn stop(&self) -> Result<()> {
        self.lock().stop()
    }

    pub fn next(&self) -> Result<()> {
        self.lock().next()
    }

    pub fn previous(&self) -> Result<()> {
        self.lock().previous()
    }

    pub fn skip_to(&self, index: usize) -> Result<()> {
        self.lock().skip_to(index)
    }

    pub fn clear_queue(&self) {
        self.lock().clear_queue();
    }

    pub fn state(&self) -> PlaybackState {
        self.lock().state()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.lock().cursor()
    }

    /// Copy of the track under the cursor
    pub fn current_track(&self) -> Option<Track> {
        self.lock().current_track().cloned()
    }

    /// Copy of the queue in play order
    pub fn queue_snapshot(&self) -> Vec<Track> {
        self.lock().queue().to_vec()
    }

    pub fn subscribe(&self) -> StateSubscription {
        self.lock().subscribe()
    }

    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        self.lock().drain_events()
    }
}

impl From<PlaybackController> for SharedController {
    fn from(controller: PlaybackController) -> Self {
        Self::new(controller)
    }
}
