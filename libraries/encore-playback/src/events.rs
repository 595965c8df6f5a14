//! Playback events
//!
//! Two ways to observe the controller:
//! - [`StateSubscription`]: a channel receiving the current state on
//!   subscribe, then every committed state in order
//! - [`PlaybackEvent`] log: buffered events the owner drains periodically
//!   (e.g. once per UI frame)
//!
//! Both are fed only after a state change has been committed.

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

use crate::types::{PlaybackState, TrackId};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state committed (emitted on every transport operation,
    /// even when the state value did not change)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// The track under the cursor started playing
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previously playing track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Queue changed (tracks added/removed/reordered/cleared)
    QueueChanged {
        /// New queue length
        length: usize,
        /// Cursor after the change
        cursor: Option<usize>,
    },

    /// A different track source was bound
    SourceChanged {
        /// Name of the newly bound source
        name: String,
    },
}

/// Receiver side of a state subscription
#[derive(Debug)]
pub struct StateSubscription {
    receiver: Receiver<PlaybackState>,
}

impl StateSubscription {
    /// Next published state, if one is already waiting
    pub fn try_next(&self) -> Option<PlaybackState> {
        match self.receiver.try_recv() {
            Ok(state) => Some(state),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next published state
    pub fn next_timeout(&self, timeout: Duration) -> Option<PlaybackState> {
        match self.receiver.recv_timeout(timeout) {
            Ok(state) => Some(state),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Everything published so far, in commit order
    pub fn drain(&self) -> Vec<PlaybackState> {
        self.receiver.try_iter().collect()
    }

    /// Latest published state, discarding older ones
    pub fn latest(&self) -> Option<PlaybackState> {
        self.receiver.try_iter().last()
    }

    /// Underlying channel, for use with `crossbeam_channel::select!`
    pub fn receiver(&self) -> &Receiver<PlaybackState> {
        &self.receiver
    }
}

/// Fan-out of committed states to every live subscription
#[derive(Debug, Default)]
pub(crate) struct StatePublisher {
    subscribers: Vec<Sender<PlaybackState>>,
}

impl StatePublisher {
    /// Register a new subscriber, seeded with `current`
    pub(crate) fn subscribe(&mut self, current: PlaybackState) -> StateSubscription {
        let (tx, rx) = unbounded();
        // Receiver is alive here, send cannot fail
        tx.send(current).ok();
        self.subscribers.push(tx);
        StateSubscription { receiver: rx }
    }

    /// Deliver `state` to every subscriber, dropping those that hung up
    pub(crate) fn publish(&mut self, state: PlaybackState) {
        self.subscribers.retain(|tx| tx.send(state).is_ok());
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Bounded buffer of undrained events
#[derive(Debug)]
pub(crate) struct EventLog {
    events: VecDeque<PlaybackEvent>,
    capacity: usize,
}

impl EventLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, event: PlaybackEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
