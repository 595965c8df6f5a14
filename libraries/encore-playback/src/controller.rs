//! Playback controller - core orchestration
//!
//! Owns the queue (tracks + cursor) and the playback state, forwards
//! transport commands to the bound [`TrackSource`] and publishes every
//! committed state.

use tracing::{debug, info, warn};

use crate::{
    error::{Boundary, PlaybackError, Result, SourceError},
    events::{EventLog, PlaybackEvent, StatePublisher, StateSubscription},
    queue::Queue,
    source::TrackSource,
    sources::LocalFileSource,
    types::{PlaybackConfig, PlaybackState, Track, TrackId},
};

/// Central playback control
///
/// Orchestrates:
/// - Queue editing (append, remove, move) with cursor adjustment
/// - Transport (play, pause, stop, next, previous)
/// - Backend swapping at any time, including mid-playback
/// - State notification (subscriptions + drained event log)
///
/// Boundary conditions (empty queue, end of queue, bad index) never panic
/// and never leave the controller inconsistent. Queue edits with an
/// out-of-range index are silent no-ops; transport requests that cannot
/// proceed return a [`PlaybackError`] and change nothing.
#[derive(Debug)]
pub struct PlaybackController {
    // State
    state: PlaybackState,
    queue: Queue,

    // Backend
    source: Box<dyn TrackSource>,

    // ID of the track most recently started, for TrackChanged events
    last_started: Option<TrackId>,

    // Notification
    publisher: StatePublisher,
    events: EventLog,
}

impl PlaybackController {
    /// Create a controller bound to `source` with default configuration
    pub fn new(source: Box<dyn TrackSource>) -> Self {
        Self::with_config(PlaybackConfig::default(), source)
    }

    /// Create a controller bound to `source`
    pub fn with_config(config: PlaybackConfig, source: Box<dyn TrackSource>) -> Self {
        debug!(
            "Creating playback controller (source: {}, max events: {})",
            source.name(),
            config.max_pending_events
        );

        Self {
            state: PlaybackState::Stopped,
            queue: Queue::new(),
            source,
            last_started: None,
            publisher: StatePublisher::default(),
            events: EventLog::new(config.max_pending_events),
        }
    }

    // ===== Source =====

    /// Bind a different track source
    ///
    /// Has no playback side effect: the new source receives the next
    /// transport command. Returns the previously bound source.
    pub fn set_source(&mut self, source: Box<dyn TrackSource>) -> Box<dyn TrackSource> {
        info!(
            "Switching track source: {} -> {} (state: {})",
            self.source.name(),
            source.name(),
            self.state
        );

        let previous = std::mem::replace(&mut self.source, source);
        self.events.push(PlaybackEvent::SourceChanged {
            name: self.source.name().to_string(),
        });
        previous
    }

    /// Name of the bound track source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Track the bound source reports as loaded
    pub fn source_current_track(&self) -> Option<Track> {
        self.source.current_track()
    }

    // ===== Playback Control =====

    /// Load the track under the cursor and start playback
    ///
    /// An unset cursor moves to the first track. With an empty queue this
    /// returns [`PlaybackError::EmptyQueue`] and leaves the state alone.
    pub fn play(&mut self) -> Result<()> {
        if self.queue.cursor().is_none() && !self.queue.is_empty() {
            self.queue.set_cursor(0);
        }

        let Some(track) = self.queue.current().cloned() else {
            info!("Nothing to play: queue is empty");
            return Err(PlaybackError::EmptyQueue);
        };

        self.source
            .load_track(track.locator())
            .map_err(|e| self.source_failure("load", e))?;
        self.source
            .play()
            .map_err(|e| self.source_failure("play", e))?;

        info!(
            "Playing '{}' by {} (position {} of {})",
            track.title(),
            track.artist(),
            self.queue.cursor().map_or(0, |c| c + 1),
            self.queue.len()
        );

        self.commit_state(PlaybackState::Playing);

        if self.last_started.as_ref() != Some(track.id()) {
            let previous_track_id = self.last_started.replace(track.id().clone());
            self.events.push(PlaybackEvent::TrackChanged {
                track_id: track.id().clone(),
                previous_track_id,
            });
        }

        Ok(())
    }

    /// Pause playback
    ///
    /// Unconditional: the source is told to pause even when nothing is
    /// playing.
    pub fn pause(&mut self) -> Result<()> {
        self.source
            .pause()
            .map_err(|e| self.source_failure("pause", e))?;
        self.commit_state(PlaybackState::Paused);
        Ok(())
    }

    /// Stop playback
    ///
    /// Unconditional, like [`pause`](Self::pause). The queue and cursor are
    /// kept.
    pub fn stop(&mut self) -> Result<()> {
        self.source
            .stop()
            .map_err(|e| self.source_failure("stop", e))?;
        self.commit_state(PlaybackState::Stopped);
        Ok(())
    }

    /// Advance to the next track and play it
    ///
    /// An unset cursor advances to the first track. At the last track this
    /// returns [`Boundary::End`] with cursor and state unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let Some(index) = self.queue.next_index() else {
            info!("End of queue reached");
            return Err(PlaybackError::QueueBoundary(Boundary::End));
        };

        self.queue.set_cursor(index);
        self.play()
    }

    /// Step back to the previous track and play it
    ///
    /// At the first track (or with no cursor) this returns
    /// [`Boundary::Start`] with cursor and state unchanged.
    pub fn previous(&mut self) -> Result<()> {
        let Some(index) = self.queue.previous_index() else {
            info!("Already at start of queue");
            return Err(PlaybackError::QueueBoundary(Boundary::Start));
        };

        self.queue.set_cursor(index);
        self.play()
    }

    /// Jump to the track at `index` and play it
    pub fn skip_to(&mut self, index: usize) -> Result<()> {
        if !self.queue.set_cursor(index) {
            return Err(PlaybackError::IndexOutOfRange {
                index,
                len: self.queue.len(),
            });
        }

        self.play()
    }

    // ===== Queue Management =====

    /// Append track to the end of the queue
    pub fn add_to_queue(&mut self, track: Track) {
        debug!("Queueing '{}' ({})", track.title(), track.id());
        self.queue.push(track);
        self.emit_queue_changed();
    }

    /// Remove track from queue by index
    ///
    /// Out-of-range indices are ignored and return `None`. Removing at or
    /// before the cursor moves the cursor back by one.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        let removed = self.queue.remove(index);

        match &removed {
            Some(track) => {
                debug!("Removed '{}' from position {}", track.title(), index);
                self.emit_queue_changed();
            }
            None => debug!(
                "Ignoring remove at {} (queue length {})",
                index,
                self.queue.len()
            ),
        }

        removed
    }

    /// Move track from `from` to `to`
    ///
    /// Returns `false` if either index is out of range (nothing changes).
    pub fn move_in_queue(&mut self, from: usize, to: usize) -> bool {
        let moved = self.queue.move_track(from, to);

        if moved {
            debug!("Moved track {} -> {}", from, to);
            self.emit_queue_changed();
        } else {
            debug!(
                "Ignoring move {} -> {} (queue length {})",
                from,
                to,
                self.queue.len()
            );
        }

        moved
    }

    /// Clear entire queue
    ///
    /// The cursor becomes unset; playback state and source are untouched.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// All queued tracks in play order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Get queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    // ===== State Queries =====

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current cursor position (`None` when unset)
    pub fn cursor(&self) -> Option<usize> {
        self.queue.cursor()
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Title of the track under the cursor
    pub fn current_title(&self) -> Option<&str> {
        self.current_track().map(Track::title)
    }

    /// Artist of the track under the cursor
    pub fn current_artist(&self) -> Option<&str> {
        self.current_track().map(Track::artist)
    }

    /// Check if `next()` would find a track
    pub fn has_next(&self) -> bool {
        self.queue.next_index().is_some()
    }

    /// Check if `previous()` would find a track
    pub fn has_previous(&self) -> bool {
        self.queue.previous_index().is_some()
    }

    // ===== Events =====

    /// Subscribe to state changes
    ///
    /// The subscription immediately holds the current state, followed by
    /// every state committed afterwards, in order.
    pub fn subscribe(&mut self) -> StateSubscription {
        self.publisher.subscribe(self.state)
    }

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn commit_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!("Playback state {} -> {}", self.state, state);
        }
        self.state = state;
        self.publisher.publish(state);
        self.events.push(PlaybackEvent::StateChanged { state });
    }

    fn emit_queue_changed(&mut self) {
        self.events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            cursor: self.queue.cursor(),
        });
    }

    fn source_failure(&self, command: &str, reason: SourceError) -> PlaybackError {
        warn!(
            "Track source '{}' failed on {}: {} (state stays {})",
            self.source.name(),
            command,
            reason,
            self.state
        );

        PlaybackError::SourceUnavailable {
            source_name: self.source.name().to_string(),
            reason,
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Box::new(LocalFileSource::new()))
    }
}
