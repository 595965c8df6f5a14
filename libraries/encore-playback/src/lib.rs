//! Encore - Playback Control
//!
//! Backend-agnostic playlist and transport control for Encore.
//!
//! This crate provides:
//! - Ordered queue with a playback cursor (append, remove, move)
//! - Transport control (play, pause, stop, next, previous)
//! - Swappable track sources (local files, remote streams, or your own)
//! - State subscriptions and a drained event log for UIs
//! - A lock-guarded handle for sharing one controller
//!
//! # Architecture
//!
//! `encore-playback` never decodes or outputs audio. Actual transport is
//! delegated to a [`TrackSource`]; the controller only tracks what should
//! be playing and in which state.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use encore_playback::{PlaybackController, PlaybackState, Track};
//! use encore_playback::sources::LocalFileSource;
//!
//! let mut controller = PlaybackController::new(Box::new(LocalFileSource::new()));
//!
//! controller.add_to_queue(Track::new("Intro", "Band", "/music/intro.flac"));
//! controller.add_to_queue(Track::new("Outro", "Band", "/music/outro.flac"));
//!
//! controller.play().unwrap();
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! assert_eq!(controller.current_title(), Some("Intro"));
//!
//! controller.next().unwrap();
//! assert_eq!(controller.cursor(), Some(1));
//!
//! // End of queue is reported, not fatal
//! assert!(controller.next().is_err());
//! ```
//!
//! # Example: Swapping Sources
//!
//! ```rust
//! use encore_playback::{PlaybackController, Track};
//! use encore_playback::sources::{LocalFileSource, StreamingSource};
//!
//! let mut controller = PlaybackController::new(Box::new(LocalFileSource::new()));
//! controller.add_to_queue(Track::new("Live", "Radio", "https://radio.example.com/live.mp3"));
//!
//! // The local backend cannot open URLs
//! assert!(controller.play().is_err());
//!
//! controller.set_source(Box::new(StreamingSource::new()));
//! controller.play().unwrap();
//! ```
//!
//! # Example: Observing State
//!
//! ```rust
//! use encore_playback::{PlaybackController, PlaybackState, Track};
//!
//! let mut controller = PlaybackController::default();
//! let states = controller.subscribe();
//!
//! controller.add_to_queue(Track::new("Song", "Artist", "/music/song.mp3"));
//! controller.play().unwrap();
//! controller.pause().unwrap();
//!
//! assert_eq!(
//!     states.drain(),
//!     vec![PlaybackState::Stopped, PlaybackState::Playing, PlaybackState::Paused]
//! );
//! ```

mod controller;
mod error;
mod events;
mod queue;
mod shared;
mod source;
pub mod sources;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{Boundary, PlaybackError, Result, SourceError, SourceResult};
pub use events::{PlaybackEvent, StateSubscription};
pub use shared::SharedController;
pub use source::TrackSource;
pub use types::{PlaybackConfig, PlaybackState, Track, TrackId};
