//! Queue controller integration tests
//!
//! Navigation, removal and mode scenarios as the web client drives them:
//! picking a playlist, next/previous buttons, removing from the queue panel.

use nox_core::{Track, TrackId};
use nox_playback::{PlaybackConfig, PlaybackEvent, PlaybackStatus, QueueController};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ===== Test Helpers =====

fn create_track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"), "Test Artist", "Test Album", Duration::from_secs(180))
}

fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| create_track(id)).collect()
}

fn seeded(seed: u64) -> QueueController<StdRng> {
    QueueController::with_rng(&PlaybackConfig::default(), StdRng::seed_from_u64(seed))
}

fn current_id(controller: &QueueController<StdRng>) -> Option<String> {
    controller.current_track().map(|t| t.id.to_string())
}

fn record_events(controller: &mut QueueController<StdRng>) -> Rc<RefCell<Vec<PlaybackEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

// ===== Queue Replacement =====

#[test]
fn test_set_queue_makes_first_track_current() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));

    assert_eq!(controller.current_index(), Some(0));
    assert_eq!(current_id(&controller).as_deref(), Some("a"));
    assert_eq!(controller.status(), PlaybackStatus::Stopped);
}

#[test]
fn test_set_queue_empty_clears_and_stops() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.play();

    controller.set_queue(Vec::new());

    let state = controller.state();
    assert!(state.current_track.is_none());
    assert!(state.current_index.is_none());
    assert_eq!(state.status, PlaybackStatus::Stopped);
}

#[test]
fn test_set_queue_while_playing_keeps_playing_new_first_track() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.play();
    controller.advance();

    controller.set_queue(tracks(&["x", "y"]));

    assert_eq!(current_id(&controller).as_deref(), Some("x"));
    assert!(controller.is_playing());
}

// ===== Sequential Navigation =====

#[test]
fn test_advance_moves_to_next_track() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));

    controller.advance();

    assert_eq!(controller.current_index(), Some(1));
    assert_eq!(current_id(&controller).as_deref(), Some("b"));
}

#[test]
fn test_advance_at_end_stops_without_wrapping() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.play();
    controller.advance();
    let generation = controller.track_generation();

    controller.advance();

    assert_eq!(controller.status(), PlaybackStatus::Stopped);
    assert_eq!(controller.current_index(), Some(1));
    assert_eq!(current_id(&controller).as_deref(), Some("b"));
    assert_eq!(controller.track_generation(), generation, "no new track was loaded");
}

#[test]
fn test_retreat_at_start_is_noop() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.play();
    let before = controller.state();
    let generation = controller.track_generation();

    controller.retreat();

    assert_eq!(controller.state(), before);
    assert_eq!(controller.track_generation(), generation);
}

#[test]
fn test_retreat_moves_to_previous_track() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(2);

    controller.retreat();

    assert_eq!(current_id(&controller).as_deref(), Some("b"));
}

#[test]
fn test_jump_to_out_of_range_is_noop() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));

    controller.jump_to(5);

    assert_eq!(controller.current_index(), Some(0));
    assert_eq!(current_id(&controller).as_deref(), Some("a"));
}

#[test]
fn test_navigation_on_empty_queue_is_noop() {
    let mut controller = seeded(1);

    controller.advance();
    controller.retreat();
    controller.play();
    controller.jump_to(0);

    let state = controller.state();
    assert!(state.current_track.is_none());
    assert!(state.current_index.is_none());
    assert_eq!(state.status, PlaybackStatus::Stopped);
}

// ===== Repeat =====

#[test]
fn test_repeat_replays_current_track() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.toggle_repeat();
    let events = record_events(&mut controller);
    let generation = controller.track_generation();

    controller.advance();

    assert_eq!(current_id(&controller).as_deref(), Some("a"));
    assert_eq!(controller.track_generation(), generation + 1);
    assert!(events.borrow().iter().any(|e| matches!(
        e,
        PlaybackEvent::TrackChanged { replay: true, index: 0, .. }
    )));
}

#[test]
fn test_repeat_does_not_affect_retreat() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(2);
    controller.toggle_repeat();

    controller.retreat();

    assert_eq!(current_id(&controller).as_deref(), Some("b"));
}

// ===== Shuffle =====

#[test]
fn test_toggle_shuffle_twice_restores_flag_only() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(1);
    let before = controller.state();

    controller.toggle_shuffle();
    controller.toggle_shuffle();

    assert_eq!(controller.state(), before);
}

#[test]
fn test_shuffle_single_track_replays_without_panic() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a"]));
    controller.toggle_shuffle();

    controller.advance();
    controller.retreat();

    assert_eq!(current_id(&controller).as_deref(), Some("a"));
    assert_eq!(controller.current_index(), Some(0));
}

#[test]
fn test_shuffle_never_picks_current_index() {
    let mut controller = seeded(42);
    controller.set_queue(tracks(&["a", "b", "c", "d"]));
    controller.toggle_shuffle();

    for _ in 0..200 {
        let before = controller.current_index();
        controller.advance();
        assert_ne!(controller.current_index(), before);
    }
}

#[test]
fn test_shuffle_reaches_every_other_entry() {
    let mut controller = seeded(7);
    controller.set_queue(tracks(&["a", "b", "c", "d"]));
    controller.toggle_shuffle();

    let mut seen = [false; 4];
    for _ in 0..200 {
        controller.advance();
        if let Some(index) = controller.current_index() {
            seen[index] = true;
        }
    }

    assert!(seen.iter().all(|s| *s), "shuffle visited {seen:?}");
}

#[test]
fn test_shuffle_is_reproducible_with_seed() {
    let order = |seed: u64| {
        let mut controller = seeded(seed);
        controller.set_queue(tracks(&["a", "b", "c", "d", "e"]));
        controller.toggle_shuffle();
        (0..20)
            .map(|_| {
                controller.advance();
                controller.current_index()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(order(99), order(99));
}

#[test]
fn test_config_seed_drives_shuffle() {
    let config = PlaybackConfig {
        shuffle: true,
        seed: Some(5),
        ..Default::default()
    };

    let run = || {
        let mut controller = QueueController::new(&config);
        controller.set_queue(tracks(&["a", "b", "c", "d"]));
        (0..10)
            .map(|_| {
                controller.advance();
                controller.current_index()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

// ===== Removal =====

#[test]
fn test_remove_current_clears_track_and_stops() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(1);
    controller.play();
    let events = record_events(&mut controller);

    let removed = controller.remove(&TrackId::new("b"));

    assert_eq!(removed.map(|t| t.id), Some(TrackId::new("b")));
    assert!(controller.current_track().is_none());
    assert_eq!(controller.status(), PlaybackStatus::Stopped);
    assert_eq!(controller.current_index(), Some(1), "cursor stays on the vacated slot");
    assert!(events.borrow().contains(&PlaybackEvent::TrackCleared {
        previous_track_id: TrackId::new("b"),
    }));
}

#[test]
fn test_remove_current_last_entry_clamps_cursor() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(2);

    controller.remove(&TrackId::new("c"));

    assert_eq!(controller.current_index(), Some(1));

    // Resuming picks up at the cursor
    controller.play();
    assert_eq!(current_id(&controller).as_deref(), Some("b"));
}

#[test]
fn test_remove_only_entry_empties_state() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a"]));
    controller.play();

    controller.remove(&TrackId::new("a"));

    let state = controller.state();
    assert!(state.current_track.is_none());
    assert!(state.current_index.is_none());
    assert_eq!(state.status, PlaybackStatus::Stopped);
}

#[test]
fn test_remove_earlier_track_shifts_index() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(2);
    controller.play();

    controller.remove(&TrackId::new("a"));

    assert_eq!(controller.current_index(), Some(1));
    assert_eq!(current_id(&controller).as_deref(), Some("c"));
    assert!(controller.is_playing());
}

#[test]
fn test_remove_later_track_keeps_index() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));
    controller.jump_to(1);

    controller.remove(&TrackId::new("c"));

    assert_eq!(controller.current_index(), Some(1));
    assert_eq!(current_id(&controller).as_deref(), Some("b"));
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    let before = controller.state();

    assert!(controller.remove(&TrackId::new("zzz")).is_none());
    assert_eq!(controller.state(), before);
    assert_eq!(controller.len(), 2);
}

#[test]
fn test_remove_playing_duplicate_clears_every_copy() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "a"]));
    controller.jump_to(2);
    controller.play();
    let events = record_events(&mut controller);

    let removed = controller.remove(&TrackId::new("a"));

    assert_eq!(removed.map(|t| t.id), Some(TrackId::new("a")));
    let ids: Vec<&str> = controller.tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
    assert!(controller.current_track().is_none());
    assert_eq!(controller.current_index(), Some(0));
    assert_eq!(controller.status(), PlaybackStatus::Stopped);
    assert!(events.borrow().contains(&PlaybackEvent::TrackCleared {
        previous_track_id: TrackId::new("a"),
    }));
}

#[test]
fn test_remove_duplicates_before_current_shift_index_by_count() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "a", "c"]));
    controller.jump_to(3);
    controller.play();

    controller.remove(&TrackId::new("a"));

    assert_eq!(controller.current_index(), Some(1));
    assert_eq!(current_id(&controller).as_deref(), Some("c"));
    assert!(controller.is_playing());
}

// ===== Enqueue / Select / Clear =====

#[test]
fn test_total_duration_follows_queue_changes() {
    let mut controller = seeded(1);
    assert_eq!(controller.total_duration(), Duration::ZERO);

    controller.set_queue(tracks(&["a", "b", "a"]));
    assert_eq!(controller.total_duration(), Duration::from_secs(540));

    controller.enqueue(create_track("c"));
    controller.remove(&TrackId::new("a"));
    assert_eq!(controller.total_duration(), Duration::from_secs(360));
}

#[test]
fn test_enqueue_on_empty_queue_sets_cursor_without_loading() {
    let mut controller = seeded(1);

    controller.enqueue(create_track("a"));

    assert_eq!(controller.current_index(), Some(0));
    assert!(controller.current_track().is_none());
    assert_eq!(controller.track_generation(), 0);

    controller.play();
    assert_eq!(current_id(&controller).as_deref(), Some("a"));
    assert!(controller.is_playing());
}

#[test]
fn test_select_plays_queued_track() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b", "c"]));

    assert!(controller.select(&TrackId::new("c")));
    assert_eq!(current_id(&controller).as_deref(), Some("c"));
    assert!(controller.is_playing());

    assert!(!controller.select(&TrackId::new("missing")));
    assert_eq!(current_id(&controller).as_deref(), Some("c"));
}

#[test]
fn test_clear_resets_everything_but_modes() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.toggle_shuffle();
    controller.play();

    controller.clear();

    let state = controller.state();
    assert!(controller.is_empty());
    assert!(state.current_track.is_none());
    assert!(state.current_index.is_none());
    assert_eq!(state.status, PlaybackStatus::Stopped);
    assert!(state.shuffle);
}

// ===== Playback Status =====

#[test]
fn test_pause_only_from_playing() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a"]));

    controller.pause();
    assert_eq!(controller.status(), PlaybackStatus::Stopped);

    controller.play();
    controller.pause();
    assert_eq!(controller.status(), PlaybackStatus::Paused);
}

#[test]
fn test_stop_keeps_current_track() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.play();

    controller.stop();

    assert_eq!(controller.status(), PlaybackStatus::Stopped);
    assert_eq!(current_id(&controller).as_deref(), Some("a"));
}

#[test]
fn test_track_ended_plays_through_queue() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    controller.play();

    controller.track_ended();
    assert_eq!(current_id(&controller).as_deref(), Some("b"));
    assert!(controller.is_playing());

    controller.track_ended();
    assert_eq!(controller.status(), PlaybackStatus::Stopped);
}

#[test]
fn test_playback_failed_pauses_and_notifies() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a"]));
    controller.play();
    let events = record_events(&mut controller);

    controller.playback_failed("NotAllowedError");

    assert_eq!(controller.status(), PlaybackStatus::Paused);
    assert!(events.borrow().contains(&PlaybackEvent::PlaybackFailed {
        track_id: Some(TrackId::new("a")),
        message: "NotAllowedError".to_string(),
    }));
}

// ===== Events =====

#[test]
fn test_track_changed_carries_track_details() {
    let mut controller = seeded(1);
    let covered = create_track("b").with_artwork("https://img.example/b.jpg");
    controller.set_queue(vec![create_track("a"), covered]);
    let events = record_events(&mut controller);

    controller.advance();

    let events = events.borrow();
    let Some(PlaybackEvent::TrackChanged { track, .. }) = events.first() else {
        panic!("expected TrackChanged, got {events:?}");
    };
    assert_eq!(track.title, "Track b");
    assert_eq!(track.artwork.as_deref(), Some("https://img.example/b.jpg"));
}

#[test]
fn test_advance_emits_track_changed_with_previous() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));
    let events = record_events(&mut controller);

    controller.advance();

    assert_eq!(
        *events.borrow(),
        vec![PlaybackEvent::TrackChanged {
            track_id: TrackId::new("b"),
            track: create_track("b"),
            previous_track_id: Some(TrackId::new("a")),
            index: 1,
            replay: false,
        }]
    );
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let mut controller = seeded(1);
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = controller.subscribe(move |_| *counter.borrow_mut() += 1);

    controller.set_queue(tracks(&["a"]));
    let after_first = *count.borrow();
    assert!(after_first > 0);

    assert!(controller.unsubscribe(id));
    controller.advance();
    assert_eq!(*count.borrow(), after_first);
    assert_eq!(controller.subscriber_count(), 0);
}

#[test]
fn test_peek_next_reflects_modes() {
    let mut controller = seeded(1);
    controller.set_queue(tracks(&["a", "b"]));

    assert_eq!(controller.peek_next().map(|t| t.id.as_str()), Some("b"));

    controller.toggle_repeat();
    assert_eq!(controller.peek_next().map(|t| t.id.as_str()), Some("a"));

    controller.toggle_repeat();
    controller.toggle_shuffle();
    assert!(controller.peek_next().is_none());
    assert!(controller.has_next());
}
