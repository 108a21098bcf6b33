//! End-to-end scenarios: command socket in, scene mutation, event socket out.

use crate::link_tests::helpers::{CommandClient, EventProbe, SceneHarness, wait_until};

use link_core::commands::register_all;
use link_core::dispatch::Dispatcher;
use link_core::protocol::Event;
use link_core::transport::{Receiver, Sender};

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use serial_test::serial;

/// Receiver + full handler set wired to a ticking scene and an event probe.
fn start_link(command_port: u16, event_port: u16) -> (Receiver, SceneHarness, EventProbe) {
    let probe = EventProbe::start(event_port);
    let harness = SceneHarness::start();
    let sender = Sender::new(format!("127.0.0.1:{event_port}"));

    let mut dispatcher = Dispatcher::new();
    register_all(&mut dispatcher, &harness.handle, &sender);

    let mut receiver = Receiver::new(
        format!("127.0.0.1:{command_port}"),
        Arc::new(dispatcher),
    );
    receiver.start().expect("Receiver failed to start");

    (receiver, harness, probe)
}

fn simple_graph() -> String {
    json!({
        "Id": 1, "Position": {"X": 0, "Y": 0, "Z": 0}, "$type": "CameraNode",
        "Successors": [{
            "Id": 2, "Position": {"X": 1, "Y": 2, "Z": 3},
            "$type": "BSDFSampleNode", "ancestorId": 1, "Successors": []
        }]
    })
    .to_string()
}

/// **VALUE**: Verifies the full round trip for the create/select/delete
/// command family: TCP line in, deferred scene mutation, event line out.
///
/// **WHY THIS MATTERS**: This is the product: the external viewer drives
/// the host over one socket and observes acknowledgements on the other.
///
/// **BUG THIS CATCHES**: Any break in the chain - framing, dispatch,
/// payload validation, bridge scheduling, scene mutation, or event
/// serialization - shows up here even when every unit test passes.
#[test]
#[serial]
fn given_running_link_when_path_lifecycle_driven_then_events_mirror_scene() {
    let (mut receiver, harness, probe) = start_link(16061, 16062);
    let mut client = CommandClient::connect(16061);

    // WHEN: creating a path
    client.send_line(
        &json!({ "command": "create_path", "id": 9, "graph": simple_graph() }).to_string(),
    );

    // THEN: the scene grows the group and `created` comes back
    assert_eq!(
        probe.next_event(Duration::from_secs(2)),
        Some(Event::Created { id: "9".to_string() })
    );
    assert!(harness.has_group("arrow_group_9"));

    // WHEN: selecting it
    client.send_line(&json!({ "command": "select_path", "id": 9 }).to_string());
    assert_eq!(
        probe.next_event(Duration::from_secs(2)),
        Some(Event::Selected { id: "9".to_string() })
    );

    // WHEN: deleting it
    client.send_line(&json!({ "command": "delete_path", "id": 9 }).to_string());
    assert_eq!(
        probe.next_event(Duration::from_secs(2)),
        Some(Event::Deleted { id: "9".to_string() })
    );
    assert!(wait_until(Duration::from_secs(2), || {
        !harness.has_group("arrow_group_9")
    }));

    receiver.stop();
}

/// **VALUE**: Verifies selecting a path that does not exist emits nothing,
/// rather than a misleading `selected` acknowledgement.
#[test]
#[serial]
fn given_missing_group_when_select_path_sent_then_no_event() {
    let (mut receiver, _harness, probe) = start_link(16063, 16064);
    let mut client = CommandClient::connect(16063);

    client.send_line(&json!({ "command": "select_path", "id": 404 }).to_string());

    assert_eq!(probe.next_event(Duration::from_millis(500)), None);

    receiver.stop();
}

/// **VALUE**: Verifies an unknown command and a payload-invalid command are
/// both absorbed without disturbing the next valid command.
#[test]
#[serial]
fn given_bad_commands_when_sent_then_link_keeps_serving() {
    let (mut receiver, harness, probe) = start_link(16065, 16066);
    let mut client = CommandClient::connect(16065);

    client.send_line(&json!({ "command": "warp_drive" }).to_string());
    client.send_line(&json!({ "command": "create_path", "graph": 42 }).to_string());
    client.send_line(
        &json!({ "command": "create_path", "id": 1, "graph": simple_graph() }).to_string(),
    );

    assert_eq!(
        probe.next_event(Duration::from_secs(2)),
        Some(Event::Created { id: "1".to_string() })
    );
    assert!(harness.has_group("arrow_group_1"));

    receiver.stop();
}
