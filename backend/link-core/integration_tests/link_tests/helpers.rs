//! Test helpers for link integration tests.
//!
//! Provides:
//! - a polling `wait_until` with a hard deadline
//! - a command client that writes raw lines to the receiver
//! - an event probe standing in for the visualization process
//! - a scene harness that ticks a `MemoryScene` on its own thread

use link_core::protocol::Event;
use link_core::scene::{HostScene, MemoryScene};
use link_core::schedule::{MainLoop, MainLoopHandle};

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver as MpscReceiver, channel};
use std::sync::{Arc, Mutex};
use std::thread::{JoinHandle, sleep, spawn};
use std::time::{Duration, Instant};

/// Poll `condition` every 10ms until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        sleep(Duration::from_millis(10));
    }
    condition()
}

/// Connect to the receiver and write raw lines on one connection.
pub struct CommandClient {
    stream: TcpStream,
}

impl CommandClient {
    pub fn connect(port: u16) -> Self {
        let address = format!("127.0.0.1:{port}");
        // The receiver may still be between bind and accept; retry briefly.
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match TcpStream::connect(&address) {
                Ok(stream) => return Self { stream },
                Err(_) if Instant::now() < deadline => sleep(Duration::from_millis(20)),
                Err(e) => panic!("Failed to connect to receiver at {address}: {e}"),
            }
        }
    }

    pub fn send_line(&mut self, line: &str) {
        self.stream
            .write_all(line.as_bytes())
            .and_then(|()| self.stream.write_all(b"\n"))
            .expect("Failed to write command line");
        self.stream.flush().expect("Failed to flush command line");
    }

    /// Write raw bytes with no framing added; for split-line tests.
    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.stream.write_all(bytes).expect("Failed to write bytes");
        self.stream.flush().expect("Failed to flush bytes");
    }
}

/// Loopback listener standing in for the visualization process. Accepts
/// connections in a loop and funnels every decoded event into one channel.
pub struct EventProbe {
    pub events: MpscReceiver<Event>,
    _worker: JoinHandle<()>,
}

impl EventProbe {
    pub fn start(port: u16) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", port)).expect("Failed to bind event probe");
        let (sink, events) = channel();

        let worker = spawn(move || {
            // One connection at a time; a dropped sender connection just
            // means waiting for the next one.
            for connection in listener.incoming() {
                let Ok(connection) = connection else { break };
                let reader = BufReader::new(connection);
                for line in reader.lines() {
                    let Ok(line) = line else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    let event: Event =
                        serde_json::from_str(&line).expect("Probe received unparseable event");
                    if sink.send(event).is_err() {
                        return;
                    }
                }
            }
        });

        Self {
            events,
            _worker: worker,
        }
    }

    pub fn next_event(&self, timeout: Duration) -> Option<Event> {
        self.events.recv_timeout(timeout).ok()
    }
}

/// Ticks a shared `MemoryScene` every 10ms on a dedicated thread, playing
/// the role of the host's cooperative main loop.
pub struct SceneHarness {
    pub scene: Arc<Mutex<MemoryScene>>,
    pub handle: MainLoopHandle,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SceneHarness {
    pub fn start() -> Self {
        let (mut main_loop, handle) = MainLoop::channel();
        let scene = Arc::new(Mutex::new(MemoryScene::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let tick_scene = Arc::clone(&scene);
        let tick_stop = Arc::clone(&stop);
        let worker = spawn(move || {
            while !tick_stop.load(Ordering::SeqCst) {
                {
                    let mut scene = tick_scene.lock().unwrap();
                    main_loop.tick(&mut *scene);
                }
                sleep(Duration::from_millis(10));
            }
        });

        Self {
            scene,
            handle,
            stop,
            worker: Some(worker),
        }
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.scene.lock().unwrap().has_group(name)
    }
}

impl Drop for SceneHarness {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
