//! Track source implementations
//!
//! Neither backend decodes or streams audio; each resolves locators into
//! track metadata, tracks its transport status and logs the commands it
//! receives.

pub mod local;
pub mod stream;

pub use local::LocalFileSource;
pub use stream::StreamingSource;

use serde::{Deserialize, Serialize};

/// Transport status as seen by a backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportStatus {
    /// Nothing loaded yet
    #[default]
    Idle,

    /// Track loaded, transport not started
    Loaded,

    Playing,

    Paused,

    Stopped,
}
