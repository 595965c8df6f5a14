/// CLI configuration
use crate::error::{CliError, Result};
use encore_playback::sources::{LocalFileSource, StreamingSource};
use encore_playback::{PlaybackConfig, Track, TrackSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix (`ENCORE_BACKEND`, `ENCORE_LOG_FILTER`, ...)
pub const ENV_PREFIX: &str = "ENCORE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Tracks queued before the first step runs
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
}

/// Track source variant to bind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Files on local disk
    #[default]
    Local,

    /// Remote http(s) streams
    Stream,
}

impl Backend {
    /// Instantiate the track source for this variant
    pub fn build(self) -> Box<dyn TrackSource> {
        match self {
            Backend::Local => Box::new(LocalFileSource::new()),
            Backend::Stream => Box::new(StreamingSource::new()),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "stream" => Ok(Backend::Stream),
            other => Err(CliError::Config(format!(
                "unknown backend '{}' (expected 'local' or 'stream')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackEntry {
    pub title: String,

    #[serde(default = "default_artist")]
    pub artist: String,

    pub locator: String,
}

impl TrackEntry {
    pub fn to_track(&self) -> Track {
        Track::new(&self.title, &self.artist, &self.locator)
    }
}

impl CliConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), but reads variables from `env` instead of
    /// the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings
                    .add_source(config::File::from(path).format(config::FileFormat::Toml));
            }
            None => {
                // Fall back to ./encore.toml if present
                let default_path = PathBuf::from("encore.toml");
                if default_path.exists() {
                    settings = settings.add_source(
                        config::File::from(default_path).format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // Override with environment variables (ENCORE_ prefix, __ for nesting)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CliError::Config("log_filter must not be empty".to_string()));
        }

        if let Some(entry) = self.tracks.iter().find(|t| t.locator.trim().is_empty()) {
            return Err(CliError::Config(format!(
                "track '{}' has an empty locator",
                entry.title
            )));
        }

        Ok(())
    }
}

// Default values
fn default_log_filter() -> String {
    "encore_playback=info,encore_cli=info".to_string()
}

fn default_artist() -> String {
    encore_playback::sources::local::UNKNOWN_ARTIST.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            log_filter: default_log_filter(),
            playback: PlaybackConfig::default(),
            tracks: Vec::new(),
        }
    }
}
