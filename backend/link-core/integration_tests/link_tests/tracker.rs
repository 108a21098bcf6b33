//! Cursor tracker sampling and deduplication.

use crate::link_tests::helpers::{EventProbe, SceneHarness, wait_until};

use link_core::protocol::Event;
use link_core::scene::CursorSample;
use link_core::tracker::CursorTracker;
use link_core::transport::Sender;

use std::time::Duration;

use glam::Vec3;
use serial_test::serial;

fn sample_at(x: f32) -> CursorSample {
    CursorSample {
        object: Some("floor".to_string()),
        hit_position: Some(Vec3::new(x, 0.0, 0.0)),
        normal: Some(Vec3::Z),
        face_index: Some(3),
        cursor_position: Vec3::new(x, 0.0, 0.0),
    }
}

/// **VALUE**: Verifies the tracker emits a `cursor_tracked` event for a new
/// sample and stays quiet while the cursor holds still.
///
/// **WHY THIS MATTERS**: The tracker fires four times a second forever; the
/// dedup is what keeps an idle cursor from flooding the event socket.
#[test]
#[serial]
fn given_stationary_then_moving_cursor_when_tracking_then_one_event_per_change() {
    let probe = EventProbe::start(16071);
    let harness = SceneHarness::start();
    let sender = Sender::new("127.0.0.1:16071");

    harness
        .scene
        .lock()
        .unwrap()
        .set_cursor_sample(Some(sample_at(1.0)));

    let mut tracker = CursorTracker::new(harness.handle.clone(), sender);
    tracker.start().expect("Tracker failed to start");

    // THEN: the first sample arrives once
    let first = probe.next_event(Duration::from_secs(2));
    match first {
        Some(Event::CursorTracked {
            object,
            hit_position,
            normal,
            face_index,
            cursor_position,
        }) => {
            assert_eq!(object.as_deref(), Some("floor"));
            assert_eq!(hit_position, Some([1.0, 0.0, 0.0]));
            assert_eq!(normal, Some([0.0, 0.0, 1.0]));
            assert_eq!(face_index, Some(3));
            assert_eq!(cursor_position, [1.0, 0.0, 0.0]);
        }
        other => panic!("Expected cursor_tracked, got {other:?}"),
    }

    // AND: an unchanged cursor produces no further events
    assert_eq!(probe.next_event(Duration::from_millis(600)), None);

    // WHEN: the cursor moves
    harness
        .scene
        .lock()
        .unwrap()
        .set_cursor_sample(Some(sample_at(2.0)));

    // THEN: exactly the new position comes through
    match probe.next_event(Duration::from_secs(2)) {
        Some(Event::CursorTracked { cursor_position, .. }) => {
            assert_eq!(cursor_position, [2.0, 0.0, 0.0]);
        }
        other => panic!("Expected cursor_tracked, got {other:?}"),
    }

    tracker.stop();
    assert!(wait_until(Duration::from_secs(2), || !tracker.is_running()));
}

/// **VALUE**: Verifies no viewport (no sample) means no events at all.
#[test]
#[serial]
fn given_no_cursor_sample_when_tracking_then_silent() {
    let probe = EventProbe::start(16072);
    let harness = SceneHarness::start();
    let sender = Sender::new("127.0.0.1:16072");

    let mut tracker = CursorTracker::new(harness.handle.clone(), sender);
    tracker.start().expect("Tracker failed to start");

    assert_eq!(probe.next_event(Duration::from_millis(600)), None);

    tracker.stop();
}
