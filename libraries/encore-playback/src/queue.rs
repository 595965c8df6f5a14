//! Ordered playlist with a playback cursor
//!
//! The cursor is kept next to the track list so that every edit adjusts
//! both in one step:
//!
//! ```text
//! index:   0    1    2    3
//!        [T1] [T2] [T3] [T4]
//!                   ^
//!                 cursor = Some(2)
//! ```
//!
//! Edits with an out-of-range index are no-ops and leave the cursor alone.

use crate::types::Track;

/// Playlist + cursor
///
/// Invariant: `cursor` is `None` or `Some(i)` with `i < tracks.len()`.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in play order (duplicates allowed)
    tracks: Vec<Track>,

    /// Selected position, `None` when unset
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append track to the end of the queue
    ///
    /// The cursor is not touched.
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove track by index
    ///
    /// Returns the removed track, or `None` if `index` is out of range.
    /// When the removed position is at or before the cursor, the cursor
    /// steps back by one (becoming unset when it was at 0).
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }

        let track = self.tracks.remove(index);

        if let Some(cursor) = self.cursor {
            if index <= cursor {
                self.cursor = cursor.checked_sub(1);
            }
        }

        Some(track)
    }

    /// Move the track at `from` to position `to`
    ///
    /// Returns `false` (and changes nothing) if either index is out of range.
    ///
    /// Cursor adjustment:
    /// - cursor at `from` follows its track to `to`
    /// - cursor inside `[min(from, to), max(from, to)]` shifts by one
    ///   towards `from` (`-1` when moving right, `+1` when moving left)
    /// - otherwise unchanged
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return false;
        }

        if from != to {
            let track = self.tracks.remove(from);
            self.tracks.insert(to, track);
        }

        if let Some(cursor) = self.cursor {
            self.cursor = Some(Self::shifted_cursor(cursor, from, to));
        }

        true
    }

    fn shifted_cursor(cursor: usize, from: usize, to: usize) -> usize {
        if cursor == from {
            return to;
        }

        let (low, high) = (from.min(to), from.max(to));
        if cursor < low || cursor > high {
            return cursor;
        }

        // cursor == from is handled above, so cursor > from here when from < to
        // and cursor < from when from > to; neither shift can leave bounds
        if from < to {
            cursor - 1
        } else {
            cursor + 1
        }
    }

    /// Remove every track and unset the cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    /// Current cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Point the cursor at `index`
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Position the next track would occupy, if it exists
    ///
    /// An unset cursor counts as "before the first track".
    pub fn next_index(&self) -> Option<usize> {
        let next = self.cursor.map_or(0, |c| c + 1);
        (next < self.tracks.len()).then_some(next)
    }

    /// Position before the cursor, if any
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.and_then(|c| c.checked_sub(1))
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.tracks.get(c))
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
