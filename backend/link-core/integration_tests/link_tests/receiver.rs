//! Receiver lifecycle and framing behavior over real sockets.

use crate::link_tests::helpers::{CommandClient, wait_until};

use link_core::dispatch::{CommandHandler, Dispatcher};
use link_core::error::command::CommandError;
use link_core::protocol::Message;
use link_core::transport::{ACCEPT_POLL_INTERVAL, Receiver};

use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::Duration;

use serial_test::serial;

/// Records every message it sees, keyed by a field named `tag`.
struct RecordingHandler {
    seen: Arc<Mutex<Vec<String>>>,
}

impl CommandHandler for RecordingHandler {
    fn name(&self) -> &'static str {
        "RecordingHandler"
    }

    fn handle(&self, message: &Message) -> Result<(), CommandError> {
        let tag = message.to_value()["tag"]
            .as_str()
            .unwrap_or("<missing>")
            .to_string();
        self.seen.lock().unwrap().push(tag);
        Ok(())
    }
}

fn recording_receiver(port: u16) -> (Receiver, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(
        "probe",
        Arc::new(RecordingHandler {
            seen: Arc::clone(&seen),
        }),
    );
    let receiver = Receiver::new(format!("127.0.0.1:{port}"), Arc::new(dispatcher));
    (receiver, seen)
}

/// **VALUE**: Verifies the whole inbound path: bind, accept, line framing,
/// dispatch — over a real socket.
///
/// **BUG THIS CATCHES**: Would catch a receiver that binds but never polls
/// accept, or a read loop that drops data arriving between polls.
#[test]
#[serial]
fn given_running_receiver_when_lines_sent_then_handlers_see_them_in_order() {
    // GIVEN: a receiver with a recording handler
    let (mut receiver, seen) = recording_receiver(16041);
    receiver.start().expect("Receiver failed to start");

    // WHEN: a client connects and sends two commands
    let mut client = CommandClient::connect(16041);
    client.send_line("{\"command\":\"probe\",\"tag\":\"one\"}");
    client.send_line("{\"command\":\"probe\",\"tag\":\"two\"}");

    // THEN: both arrive in wire order
    assert!(wait_until(Duration::from_secs(2), || {
        seen.lock().unwrap().len() == 2
    }));
    assert_eq!(*seen.lock().unwrap(), ["one", "two"]);

    receiver.stop();
}

/// **VALUE**: Verifies a command split across TCP writes still dispatches
/// once, and a malformed line leaves the connection usable.
#[test]
#[serial]
fn given_split_and_malformed_lines_when_sent_then_connection_survives() {
    let (mut receiver, seen) = recording_receiver(16042);
    receiver.start().expect("Receiver failed to start");

    let mut client = CommandClient::connect(16042);

    // Half a line, then garbage on its own line, then the other half.
    client.send_raw(b"{\"command\":\"probe\",");
    client.send_raw(b"\"tag\":\"split\"}\nthis is not json\n");
    client.send_line("{\"command\":\"probe\",\"tag\":\"after\"}");

    assert!(wait_until(Duration::from_secs(2), || {
        seen.lock().unwrap().len() == 2
    }));
    assert_eq!(*seen.lock().unwrap(), ["split", "after"]);

    receiver.stop();
}

/// **VALUE**: Verifies `start` is idempotent and a stopped receiver can
/// rebind the same port.
///
/// **WHY THIS MATTERS**: The host toggles the link from its UI; stop then
/// start on the same configured port is the normal path, not an edge case.
#[test]
#[serial]
fn given_stopped_receiver_when_started_again_then_same_port_rebinds() {
    let (mut receiver, seen) = recording_receiver(16043);

    // GIVEN: started twice - the second call is a no-op
    receiver.start().expect("First start failed");
    receiver.start().expect("Second start should be a no-op");
    assert!(receiver.is_running());

    // WHEN: stopped, the worker winds down within a poll interval or two
    receiver.stop();
    assert!(wait_until(Duration::from_secs(2), || !receiver.is_running()));
    sleep(ACCEPT_POLL_INTERVAL);

    // THEN: a fresh start rebinds and serves traffic again
    receiver.start().expect("Restart failed to rebind");
    let mut client = CommandClient::connect(16043);
    client.send_line("{\"command\":\"probe\",\"tag\":\"reborn\"}");

    assert!(wait_until(Duration::from_secs(2), || {
        seen.lock().unwrap().as_slice() == ["reborn"]
    }));

    receiver.stop();
}

/// **VALUE**: Verifies `start` called immediately after `stop` - before the
/// worker has observed the flag - still yields a live, serving receiver.
///
/// **WHY THIS MATTERS**: `stop` is asynchronous by contract; a caller that
/// toggles the link off and straight back on must not be left with a
/// receiver that reported `Ok` from `start` and then quietly died.
///
/// **BUG THIS CATCHES**: A `start` that treats the still-winding-down
/// worker as "already running" returns a no-op success while the old
/// worker exits, leaving nothing bound to the port.
#[test]
#[serial]
fn given_stop_then_immediate_start_when_commands_sent_then_receiver_serves() {
    let (mut receiver, seen) = recording_receiver(16045);
    receiver.start().expect("Initial start failed");

    // WHEN: restarting with no settling delay between the calls
    receiver.stop();
    receiver.start().expect("Immediate restart failed");

    // THEN: the receiver is alive well past the worker's poll interval
    sleep(ACCEPT_POLL_INTERVAL * 4);
    assert!(receiver.is_running(), "Restarted receiver must stay alive");

    // AND: it actually serves traffic
    let mut client = CommandClient::connect(16045);
    client.send_line("{\"command\":\"probe\",\"tag\":\"again\"}");
    assert!(wait_until(Duration::from_secs(2), || {
        seen.lock().unwrap().as_slice() == ["again"]
    }));

    receiver.stop();
}

/// **VALUE**: Verifies two receivers on one port fail loudly at `start`,
/// not silently at runtime.
#[test]
#[serial]
fn given_port_in_use_when_second_receiver_starts_then_bind_error() {
    let (mut first, _) = recording_receiver(16044);
    first.start().expect("First receiver failed to start");

    let (mut second, _) = recording_receiver(16044);
    assert!(second.start().is_err(), "Second bind must fail");

    first.stop();
}
