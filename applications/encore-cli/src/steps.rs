//! Scripted playback steps
//!
//! Each command-line step is one controller operation:
//!
//! ```text
//! play | pause | stop | next | prev | clear | status
//! add=<locator>        append a track (title from the locator)
//! remove=<index>       remove by position
//! move=<from>:<to>     reposition a track
//! skip=<index>         jump to a position and play
//! source=local|stream  swap the track source
//! ```

use crate::config::Backend;
use crate::error::{CliError, Result};
use encore_playback::{PlaybackController, PlaybackError, Track};
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    Clear,
    Status,
    Add(String),
    Remove(usize),
    Move(usize, usize),
    Skip(usize),
    Source(Backend),
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| CliError::InvalidStep {
            step: raw.to_string(),
            reason: reason.to_string(),
        };
        let index = |value: &str| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid("expected a non-negative index"))
        };

        let (name, arg) = match raw.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg)),
            None => (raw.trim(), None),
        };

        match (name.to_ascii_lowercase().as_str(), arg) {
            ("play", None) => Ok(Step::Play),
            ("pause", None) => Ok(Step::Pause),
            ("stop", None) => Ok(Step::Stop),
            ("next", None) => Ok(Step::Next),
            ("prev" | "previous", None) => Ok(Step::Previous),
            ("clear", None) => Ok(Step::Clear),
            ("status", None) => Ok(Step::Status),
            ("add", Some(locator)) if !locator.trim().is_empty() => {
                Ok(Step::Add(locator.trim().to_string()))
            }
            ("remove", Some(value)) => Ok(Step::Remove(index(value)?)),
            ("skip", Some(value)) => Ok(Step::Skip(index(value)?)),
            ("move", Some(value)) => {
                let (from, to) = value
                    .split_once(':')
                    .ok_or_else(|| invalid("expected move=<from>:<to>"))?;
                Ok(Step::Move(index(from)?, index(to)?))
            }
            ("source", Some(value)) => Ok(Step::Source(value.parse()?)),
            _ => Err(invalid("unknown step")),
        }
    }
}

/// Counts of what happened during a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    /// Steps the controller reported as not applicable (boundaries, empty queue, ...)
    pub rejected: usize,
}

/// Title for a track added from the command line
fn title_from_locator(locator: &str) -> String {
    locator
        .trim_end_matches('/')
        .rsplit(['/', '\\'])
        .next()
        .map(|name| match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        })
        .filter(|name| !name.is_empty())
        .unwrap_or(locator)
        .to_string()
}

/// Apply one step
///
/// Returns `Ok(false)` when the controller rejected it with a recoverable
/// condition.
pub fn apply(controller: &mut PlaybackController, step: &Step) -> Result<bool> {
    let outcome: std::result::Result<(), PlaybackError> = match step {
        Step::Play => controller.play(),
        Step::Pause => controller.pause(),
        Step::Stop => controller.stop(),
        Step::Next => controller.next(),
        Step::Previous => controller.previous(),
        Step::Skip(index) => controller.skip_to(*index),
        Step::Clear => {
            controller.clear_queue();
            Ok(())
        }
        Step::Status => {
            print_status(controller);
            Ok(())
        }
        Step::Add(locator) => {
            let track = Track::new(
                title_from_locator(locator),
                encore_playback::sources::local::UNKNOWN_ARTIST,
                locator.as_str(),
            );
            controller.add_to_queue(track);
            Ok(())
        }
        Step::Remove(index) => {
            if controller.remove_from_queue(*index).is_none() {
                info!("remove={} ignored: no track at that position", index);
            }
            Ok(())
        }
        Step::Move(from, to) => {
            if !controller.move_in_queue(*from, *to) {
                info!("move={}:{} ignored: position out of range", from, to);
            }
            Ok(())
        }
        Step::Source(backend) => {
            controller.set_source(backend.build());
            Ok(())
        }
    };

    match outcome {
        Ok(()) => Ok(true),
        Err(e) => {
            warn!("{:?}: {}", step, e);
            Ok(false)
        }
    }
}

/// Apply every step in order
///
/// With `stop_on_error`, the first rejected step aborts the run with that
/// error.
pub fn run(
    controller: &mut PlaybackController,
    steps: &[Step],
    stop_on_error: bool,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for step in steps {
        if stop_on_error {
            apply_strict(controller, step)?;
            summary.applied += 1;
        } else if apply(controller, step)? {
            summary.applied += 1;
        } else {
            summary.rejected += 1;
        }
    }

    Ok(summary)
}

fn apply_strict(controller: &mut PlaybackController, step: &Step) -> Result<()> {
    match step {
        Step::Play => controller.play()?,
        Step::Pause => controller.pause()?,
        Step::Stop => controller.stop()?,
        Step::Next => controller.next()?,
        Step::Previous => controller.previous()?,
        Step::Skip(index) => controller.skip_to(*index)?,
        other => {
            apply(controller, other)?;
        }
    }
    Ok(())
}

/// Print the controller's current position and state
pub fn print_status(controller: &PlaybackController) {
    let position = controller
        .cursor()
        .map_or_else(|| "-".to_string(), |c| (c + 1).to_string());

    println!(
        "[{}] {} / {} via {}",
        controller.state(),
        position,
        controller.queue_len(),
        controller.source_name()
    );

    for (i, track) in controller.queue().iter().enumerate() {
        let marker = if controller.cursor() == Some(i) { ">" } else { " " };
        println!("{} {:>3}. {} - {}", marker, i + 1, track.artist(), track.title());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_playback::PlaybackState;

    fn parse(raw: &str) -> Step {
        raw.parse().unwrap()
    }

    #[test]
    fn parses_transport_steps() {
        assert_eq!(parse("play"), Step::Play);
        assert_eq!(parse("PAUSE"), Step::Pause);
        assert_eq!(parse("prev"), Step::Previous);
        assert_eq!(parse("previous"), Step::Previous);
        assert_eq!(parse("status"), Step::Status);
    }

    #[test]
    fn parses_steps_with_arguments() {
        assert_eq!(parse("add=/music/a.mp3"), Step::Add("/music/a.mp3".to_string()));
        assert_eq!(parse("remove=2"), Step::Remove(2));
        assert_eq!(parse("move=0:2"), Step::Move(0, 2));
        assert_eq!(parse("skip=1"), Step::Skip(1));
        assert_eq!(parse("source=stream"), Step::Source(Backend::Stream));
    }

    #[test]
    fn rejects_malformed_steps() {
        for raw in ["dance", "remove=-1", "move=3", "add=", "play=1", "source=tape"] {
            assert!(raw.parse::<Step>().is_err(), "{} should not parse", raw);
        }
    }

    #[test]
    fn title_is_derived_from_locator() {
        assert_eq!(title_from_locator("/music/Intro.flac"), "Intro");
        assert_eq!(title_from_locator("https://example.com/live/"), "live");
        assert_eq!(title_from_locator("C:\\music\\song.mp3"), "song");
        assert_eq!(title_from_locator("plain"), "plain");
    }

    #[test]
    fn run_counts_rejected_steps() {
        let mut controller = PlaybackController::default();
        let steps = vec![
            Step::Play,
            Step::Add("/music/a.mp3".to_string()),
            Step::Add("/music/b.mp3".to_string()),
            Step::Play,
            Step::Next,
            Step::Next,
            Step::Move(1, 0),
        ];

        let summary = run(&mut controller, &steps, false).unwrap();

        assert_eq!(summary, RunSummary { applied: 5, rejected: 2 });
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(controller.current_title(), Some("b"));
    }

    #[test]
    fn strict_run_stops_at_first_rejection() {
        let mut controller = PlaybackController::default();
        let steps = vec![Step::Add("/music/a.mp3".to_string()), Step::Previous, Step::Play];

        let result = run(&mut controller, &steps, true);

        assert!(matches!(
            result,
            Err(CliError::Playback(PlaybackError::QueueBoundary(_)))
        ));
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn source_step_swaps_backend() {
        let mut controller = PlaybackController::default();

        assert!(apply(&mut controller, &Step::Source(Backend::Stream)).unwrap());

        assert_eq!(controller.source_name(), "stream");
    }
}
