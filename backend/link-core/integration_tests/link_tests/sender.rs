//! Sender behavior against a live and an absent peer.

use crate::link_tests::helpers::EventProbe;

use link_core::protocol::Event;
use link_core::transport::Sender;

use std::time::Duration;

use serial_test::serial;

/// **VALUE**: Verifies sending with nobody listening is a silent no-op.
///
/// **WHY THIS MATTERS**: The visualization process is optional; the host
/// must run identically whether or not it is attached.
#[test]
#[serial]
fn given_no_listener_when_sending_then_silent_no_op() {
    let sender = Sender::new("127.0.0.1:16051");

    sender.send(&Event::Created { id: "1".to_string() });

    assert!(!sender.is_connected(), "No connection to a dead port");
}

/// **VALUE**: Verifies the lazy first connect and that events arrive as
/// parseable single lines.
#[test]
#[serial]
fn given_listening_probe_when_sending_then_event_delivered() {
    let probe = EventProbe::start(16052);
    let sender = Sender::new("127.0.0.1:16052");
    assert!(!sender.is_connected(), "No connection before the first send");

    sender.send(&Event::Selected { id: "7".to_string() });

    assert_eq!(
        probe.next_event(Duration::from_secs(2)),
        Some(Event::Selected { id: "7".to_string() })
    );
    assert!(sender.is_connected());
}

/// **VALUE**: Verifies a dropped connection heals transparently on the next
/// send, with no caller involvement.
///
/// **BUG THIS CATCHES**: A sender that caches a dead stream forever would
/// go permanently mute after the peer's first restart.
#[test]
#[serial]
fn given_dropped_connection_when_sending_again_then_reconnects() {
    let probe = EventProbe::start(16053);
    let sender = Sender::new("127.0.0.1:16053");

    sender.send(&Event::Created { id: "a".to_string() });
    assert!(probe.next_event(Duration::from_secs(2)).is_some());

    // WHEN: the connection is torn down between sends
    sender.disconnect();
    assert!(!sender.is_connected());
    sender.send(&Event::Deleted { id: "a".to_string() });

    // THEN: the event arrives over a fresh connection
    assert_eq!(
        probe.next_event(Duration::from_secs(2)),
        Some(Event::Deleted { id: "a".to_string() })
    );
}

/// **VALUE**: Verifies clones share one connection slot; a clone's send
/// reuses (or repairs) the same underlying stream.
#[test]
#[serial]
fn given_cloned_sender_when_both_send_then_one_connection_shared() {
    let probe = EventProbe::start(16054);
    let sender = Sender::new("127.0.0.1:16054");
    let clone = sender.clone();

    sender.send(&Event::Created { id: "x".to_string() });
    clone.send(&Event::Selected { id: "x".to_string() });

    assert!(probe.next_event(Duration::from_secs(2)).is_some());
    assert!(probe.next_event(Duration::from_secs(2)).is_some());
    assert!(clone.is_connected());
}
