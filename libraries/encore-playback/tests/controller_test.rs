//! Integration tests for the playback controller
//!
//! These tests drive the controller through real usage sequences and check
//! exactly which transport commands reach the bound source.

use encore_playback::{
    Boundary, PlaybackController, PlaybackError, PlaybackEvent, PlaybackState, SourceError,
    SourceResult, Track, TrackId, TrackSource,
};
use std::sync::{Arc, Mutex};

// ===== Test Helpers =====

/// Transport command as seen by a source
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(String),
    Play,
    Pause,
    Stop,
}

/// Mock source recording every command into a shared log
struct RecordingSource {
    name: &'static str,
    calls: Arc<Mutex<Vec<Call>>>,
    loaded: Option<String>,
    fail_loads: bool,
}

impl RecordingSource {
    fn new(name: &'static str) -> (Self, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let source = Self {
            name,
            calls: Arc::clone(&calls),
            loaded: None,
            fail_loads: false,
        };
        (source, calls)
    }

    fn failing(name: &'static str) -> (Self, Arc<Mutex<Vec<Call>>>) {
        let (mut source, calls) = Self::new(name);
        source.fail_loads = true;
        (source, calls)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TrackSource for RecordingSource {
    fn name(&self) -> &str {
        self.name
    }

    fn load_track(&mut self, locator: &str) -> SourceResult<()> {
        self.record(Call::Load(locator.to_string()));
        if self.fail_loads {
            return Err(SourceError::InvalidLocator {
                locator: locator.to_string(),
                message: "unreachable".to_string(),
            });
        }
        self.loaded = Some(locator.to_string());
        Ok(())
    }

    fn play(&mut self) -> SourceResult<()> {
        self.record(Call::Play);
        Ok(())
    }

    fn pause(&mut self) -> SourceResult<()> {
        self.record(Call::Pause);
        Ok(())
    }

    fn stop(&mut self) -> SourceResult<()> {
        self.record(Call::Stop);
        Ok(())
    }

    fn current_track(&self) -> Option<Track> {
        self.loaded
            .as_ref()
            .map(|locator| Track::with_id(TrackId::new(locator), locator, "mock", locator))
    }
}

fn track(id: &str) -> Track {
    Track::with_id(
        TrackId::new(id),
        format!("Title {}", id),
        format!("Artist {}", id),
        format!("mock://{}", id),
    )
}

/// Controller with T1..Tn queued, plus the source's call log
fn controller_with_tracks(n: usize) -> (PlaybackController, Arc<Mutex<Vec<Call>>>) {
    let (source, calls) = RecordingSource::new("recording");
    let mut controller = PlaybackController::new(Box::new(source));
    for i in 1..=n {
        controller.add_to_queue(track(&format!("T{}", i)));
    }
    (controller, calls)
}

fn take_calls(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<Call> {
    std::mem::take(&mut *calls.lock().unwrap())
}

fn queue_ids(controller: &PlaybackController) -> Vec<String> {
    controller
        .queue()
        .iter()
        .map(|t| t.id().to_string())
        .collect()
}

// ===== Scenarios =====

#[test]
fn play_on_empty_queue_reports_empty_and_stays_stopped() {
    let (mut controller, calls) = controller_with_tracks(0);

    let result = controller.play();

    assert!(matches!(result, Err(PlaybackError::EmptyQueue)));
    assert_eq!(controller.state(), PlaybackState::Stopped);
    assert_eq!(controller.cursor(), None);
    assert!(take_calls(&calls).is_empty());
}

#[test]
fn play_with_unset_cursor_loads_first_track_then_plays() {
    let (mut controller, calls) = controller_with_tracks(3);
    assert_eq!(controller.cursor(), None);

    controller.play().unwrap();

    assert_eq!(controller.cursor(), Some(0));
    assert_eq!(controller.state(), PlaybackState::Playing);
    assert_eq!(
        take_calls(&calls),
        vec![Call::Load("mock://T1".to_string()), Call::Play]
    );
    assert_eq!(controller.current_title(), Some("Title T1"));
    assert_eq!(controller.current_artist(), Some("Artist T1"));
}

#[test]
fn next_advances_until_end_of_queue() {
    let (mut controller, calls) = controller_with_tracks(3);
    controller.play().unwrap();
    take_calls(&calls);

    controller.next().unwrap();
    assert_eq!(controller.cursor(), Some(1));
    assert_eq!(controller.state(), PlaybackState::Playing);

    controller.next().unwrap();
    assert_eq!(controller.cursor(), Some(2));
    assert_eq!(controller.state(), PlaybackState::Playing);
    assert_eq!(
        take_calls(&calls),
        vec![
            Call::Load("mock://T2".to_string()),
            Call::Play,
            Call::Load("mock://T3".to_string()),
            Call::Play,
        ]
    );

    let result = controller.next();

    assert!(matches!(
        result,
        Err(PlaybackError::QueueBoundary(Boundary::End))
    ));
    assert_eq!(controller.cursor(), Some(2));
    assert_eq!(controller.state(), PlaybackState::Playing);
    assert!(take_calls(&calls).is_empty());
}

#[test]
fn next_from_unset_cursor_plays_first_track() {
    let (mut controller, _calls) = controller_with_tracks(2);

    controller.next().unwrap();

    assert_eq!(controller.cursor(), Some(0));
    assert_eq!(controller.state(), PlaybackState::Playing);
}

#[test]
fn next_on_empty_queue_reports_end() {
    let (mut controller, _calls) = controller_with_tracks(0);

    assert!(matches!(
        controller.next(),
        Err(PlaybackError::QueueBoundary(Boundary::End))
    ));
}

#[test]
fn previous_steps_back_until_start() {
    let (mut controller, calls) = controller_with_tracks(3);
    controller.skip_to(1).unwrap();
    take_calls(&calls);

    controller.previous().unwrap();
    assert_eq!(controller.cursor(), Some(0));
    assert_eq!(
        take_calls(&calls),
        vec![Call::Load("mock://T1".to_string()), Call::Play]
    );

    let result = controller.previous();

    assert!(matches!(
        result,
        Err(PlaybackError::QueueBoundary(Boundary::Start))
    ));
    assert_eq!(controller.cursor(), Some(0));
    assert!(take_calls(&calls).is_empty());
}

#[test]
fn previous_with_unset_cursor_reports_start() {
    let (mut controller, _calls) = controller_with_tracks(3);

    assert!(matches!(
        controller.previous(),
        Err(PlaybackError::QueueBoundary(Boundary::Start))
    ));
    assert_eq!(controller.cursor(), None);
    assert_eq!(controller.state(), PlaybackState::Stopped);
}

#[test]
fn move_first_to_last_shifts_cursor_by_position() {
    let (mut controller, _calls) = controller_with_tracks(3);
    controller.skip_to(2).unwrap();

    assert!(controller.move_in_queue(0, 2));

    assert_eq!(queue_ids(&controller), vec!["T2", "T3", "T1"]);
    assert_eq!(controller.cursor(), Some(1));
}

#[test]
fn removing_only_track_unsets_cursor() {
    let (mut controller, _calls) = controller_with_tracks(1);
    controller.play().unwrap();
    assert_eq!(controller.cursor(), Some(0));

    let removed = controller.remove_from_queue(0);

    assert_eq!(removed.map(|t| t.id().to_string()), Some("T1".to_string()));
    assert_eq!(controller.queue_len(), 0);
    assert_eq!(controller.cursor(), None);
}

#[test]
fn add_then_remove_restores_empty_queue() {
    let (mut controller, _calls) = controller_with_tracks(0);

    controller.add_to_queue(track("T1"));
    controller.remove_from_queue(0);

    assert!(controller.queue().is_empty());
    assert_eq!(controller.cursor(), None);
}

#[test]
fn out_of_range_edits_change_nothing() {
    let (mut controller, _calls) = controller_with_tracks(3);
    controller.skip_to(1).unwrap();

    assert!(controller.remove_from_queue(3).is_none());
    assert!(controller.remove_from_queue(usize::MAX).is_none());
    assert!(!controller.move_in_queue(0, 3));
    assert!(!controller.move_in_queue(7, 0));

    assert_eq!(queue_ids(&controller), vec!["T1", "T2", "T3"]);
    assert_eq!(controller.cursor(), Some(1));
}

// ===== Transport =====

#[test]
fn stop_twice_is_idempotent() {
    let (mut controller, calls) = controller_with_tracks(2);
    controller.play().unwrap();
    take_calls(&calls);

    controller.stop().unwrap();
    assert_eq!(controller.state(), PlaybackState::Stopped);
    let first = take_calls(&calls);

    controller.stop().unwrap();
    assert_eq!(controller.state(), PlaybackState::Stopped);
    let second = take_calls(&calls);

    assert_eq!(first, vec![Call::Stop]);
    assert_eq!(first, second);
}

#[test]
fn pause_is_unconditional() {
    let (mut controller, calls) = controller_with_tracks(0);

    controller.pause().unwrap();

    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(take_calls(&calls), vec![Call::Pause]);
}

#[test]
fn play_after_pause_reloads_current_track() {
    let (mut controller, calls) = controller_with_tracks(2);
    controller.skip_to(1).unwrap();
    controller.pause().unwrap();
    take_calls(&calls);

    controller.play().unwrap();

    assert_eq!(controller.state(), PlaybackState::Playing);
    assert_eq!(controller.cursor(), Some(1));
    assert_eq!(
        take_calls(&calls),
        vec![Call::Load("mock://T2".to_string()), Call::Play]
    );
}

#[test]
fn stop_keeps_queue_and_cursor() {
    let (mut controller, _calls) = controller_with_tracks(3);
    controller.skip_to(2).unwrap();

    controller.stop().unwrap();

    assert_eq!(controller.queue_len(), 3);
    assert_eq!(controller.cursor(), Some(2));
}

// ===== Source swapping =====

#[test]
fn swapped_source_receives_only_later_commands() {
    let (mut controller, old_calls) = controller_with_tracks(2);
    controller.play().unwrap();
    take_calls(&old_calls);

    let (replacement, new_calls) = RecordingSource::new("replacement");
    let previous = controller.set_source(Box::new(replacement));

    // No transport side effect from the swap itself
    assert_eq!(previous.name(), "recording");
    assert_eq!(controller.state(), PlaybackState::Playing);
    assert!(take_calls(&old_calls).is_empty());
    assert!(take_calls(&new_calls).is_empty());

    controller.next().unwrap();

    assert!(take_calls(&old_calls).is_empty());
    assert_eq!(
        take_calls(&new_calls),
        vec![Call::Load("mock://T2".to_string()), Call::Play]
    );
    assert_eq!(controller.source_name(), "replacement");
    assert_eq!(
        controller.source_current_track().map(|t| t.locator().to_string()),
        Some("mock://T2".to_string())
    );
}

#[test]
fn source_failure_leaves_state_unchanged() {
    let (mut controller, _calls) = controller_with_tracks(2);
    controller.play().unwrap();
    controller.pause().unwrap();

    let (broken, broken_calls) = RecordingSource::failing("broken");
    controller.set_source(Box::new(broken));
    let states = controller.subscribe();

    let result = controller.next();

    match result {
        Err(PlaybackError::SourceUnavailable {
            source_name,
            reason,
        }) => {
            assert_eq!(source_name, "broken");
            assert!(matches!(reason, SourceError::InvalidLocator { .. }));
        }
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }

    // Load was attempted, play never issued
    assert_eq!(
        take_calls(&broken_calls),
        vec![Call::Load("mock://T2".to_string())]
    );
    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(controller.cursor(), Some(1));
    // Only the initial state: nothing was published
    assert_eq!(states.drain(), vec![PlaybackState::Paused]);
}

// ===== Notification =====

#[test]
fn subscribers_observe_states_in_commit_order() {
    let (mut controller, _calls) = controller_with_tracks(3);
    let early = controller.subscribe();

    controller.play().unwrap();
    controller.pause().unwrap();

    let late = controller.subscribe();

    controller.next().unwrap();
    controller.stop().unwrap();
    controller.stop().unwrap();

    assert_eq!(
        early.drain(),
        vec![
            PlaybackState::Stopped,
            PlaybackState::Playing,
            PlaybackState::Paused,
            PlaybackState::Playing,
            PlaybackState::Stopped,
            PlaybackState::Stopped,
        ]
    );
    assert_eq!(
        late.drain(),
        vec![
            PlaybackState::Paused,
            PlaybackState::Playing,
            PlaybackState::Stopped,
            PlaybackState::Stopped,
        ]
    );
}

#[test]
fn last_received_state_matches_controller_at_quiescence() {
    let (mut controller, _calls) = controller_with_tracks(3);
    let states = controller.subscribe();

    controller.play().unwrap();
    controller.next().ok();
    controller.next().ok();
    controller.next().ok();
    controller.pause().unwrap();
    controller.previous().ok();

    assert_eq!(states.latest(), Some(controller.state()));
}

#[test]
fn rejected_operations_publish_nothing() {
    let (mut controller, _calls) = controller_with_tracks(0);
    let states = controller.subscribe();
    controller.drain_events();

    controller.play().ok();
    controller.next().ok();
    controller.previous().ok();
    controller.remove_from_queue(0);
    controller.move_in_queue(0, 1);

    assert_eq!(states.drain(), vec![PlaybackState::Stopped]);
    assert!(controller.drain_events().is_empty());
}

#[test]
fn event_log_tracks_a_listening_session() {
    let (mut controller, _calls) = controller_with_tracks(2);
    controller.drain_events();

    controller.play().unwrap();
    controller.remove_from_queue(1);
    controller.stop().unwrap();

    assert_eq!(
        controller.drain_events(),
        vec![
            PlaybackEvent::StateChanged {
                state: PlaybackState::Playing
            },
            PlaybackEvent::TrackChanged {
                track_id: TrackId::new("T1"),
                previous_track_id: None,
            },
            PlaybackEvent::QueueChanged {
                length: 1,
                cursor: Some(0),
            },
            PlaybackEvent::StateChanged {
                state: PlaybackState::Stopped
            },
        ]
    );
    assert!(!controller.has_pending_events());
}
