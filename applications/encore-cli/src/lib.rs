//! Encore CLI Library
//!
//! Thin driver around `encore-playback`: loads configuration, seeds a queue
//! and replays a sequence of playback steps.
//!
//! This library exposes the pieces used by the `encore` binary for testing.

pub mod config;
pub mod error;
pub mod steps;

// Re-export commonly used types for convenience
pub use config::{Backend, CliConfig, TrackEntry};
pub use error::{CliError, Result};
pub use steps::{RunSummary, Step};
