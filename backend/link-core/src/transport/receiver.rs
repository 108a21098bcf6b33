//! Inbound command receiver.
//!
//! Binds a loopback listener and serves at most one connection at a time
//! from a single background worker. Both the accept loop and the read loop
//! poll non-blocking sockets with a bounded sleep, so the stop flag is
//! observed within one poll interval even with no traffic.
//!
//! Failure semantics: a bind failure is surfaced once from `start()` and
//! the receiver does not run - there is no retry. Per-connection I/O errors
//! only drop that connection; the accept loop resumes waiting for the next
//! client until `stop()` is called.

use crate::dispatch::Dispatcher;
use crate::error::transport::TransportError;
use crate::protocol::LineDecoder;

use common::ErrorLocation;

use std::io::{ErrorKind, Read};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{Builder as ThreadBuilder, JoinHandle, sleep};

use log::{debug, info, warn};
use socket2::{Domain, Socket, Type};

/// How often the accept loop checks the stop flag with no pending client.
pub const ACCEPT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

/// How often the per-connection read loop checks for data / the stop flag.
pub const READ_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(50);

const READ_CHUNK_SIZE: usize = 1024;

/// TCP server for inbound commands.
///
/// `start()` is idempotent and `stop()` is best-effort and asynchronous:
/// it requests termination and returns immediately; the worker observes
/// the flag within one poll interval and closes the listener on exit.
pub struct Receiver {
    address: String,
    dispatcher: Arc<Dispatcher>,
    stop: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Receiver {
    pub fn new(address: impl Into<String>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            address: address.into(),
            dispatcher,
            stop: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Bind the listener and spawn the worker thread.
    ///
    /// Calling while already running is a no-op. After `stop()`, a new
    /// `start()` rebinds the same address and resumes accepting.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Bind`] if the listener cannot bind - the
    /// receiver does not start and nothing is retried.
    pub fn start(&mut self) -> Result<(), TransportError> {
        // A requested stop may not have been observed yet; wait for that
        // worker to wind down (bounded by one poll interval) so the flag
        // check below sees the real state and the port is free to rebind.
        if self.stop.load(Ordering::SeqCst) {
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }

        if self.running.load(Ordering::SeqCst) {
            debug!("Receiver already running on {}", self.address);
            return Ok(());
        }

        // Reap a worker left over from a previous stop().
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        let listener = bind_listener(&self.address)?;
        info!("Receiver listening on {}", self.address);

        self.stop.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);

        let dispatcher = Arc::clone(&self.dispatcher);
        let stop = Arc::clone(&self.stop);
        let running = Arc::clone(&self.running);

        let worker = ThreadBuilder::new()
            .name("link-receiver".into())
            .spawn(move || {
                accept_loop(&listener, &dispatcher, &stop);
                // Listener drops here, releasing the port.
                running.store(false, Ordering::SeqCst);
                info!("Receiver closed");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                TransportError::Spawn {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        self.worker = Some(worker);
        Ok(())
    }

    /// Request worker termination; returns immediately.
    ///
    /// Shutdown is eventual, not synchronous: the listener stops accepting
    /// once the worker observes the flag, within one poll interval.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Whether the worker is currently alive.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Bind a non-blocking loopback listener with address reuse and backlog 1.
fn bind_listener(address: &str) -> Result<TcpListener, TransportError> {
    let socket_address: SocketAddr = address.parse().map_err(|e| TransportError::Address {
        address: address.to_string(),
        message: format!("{e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let bind = |e: std::io::Error| TransportError::Bind {
        address: address.to_string(),
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let socket = Socket::new(Domain::for_address(socket_address), Type::STREAM, None).map_err(bind)?;
    socket.set_reuse_address(true).map_err(bind)?;
    socket.bind(&socket_address.into()).map_err(bind)?;
    socket.listen(1).map_err(bind)?;

    let listener: TcpListener = socket.into();
    listener.set_nonblocking(true).map_err(bind)?;
    Ok(listener)
}

/// Outer loop: wait for one client at a time until stop is requested.
fn accept_loop(listener: &TcpListener, dispatcher: &Dispatcher, stop: &AtomicBool) {
    while !stop.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((connection, peer)) => {
                info!("Receiver connected: {peer}");
                if let Err(e) = connection.set_nonblocking(true) {
                    warn!("Failed to configure connection from {peer}: {e}");
                    continue;
                }
                read_loop(connection, dispatcher, stop);
                info!("Receiver disconnected: {peer}");
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => sleep(ACCEPT_POLL_INTERVAL),
            Err(e) => {
                warn!("Receiver accept failed: {e}");
                sleep(ACCEPT_POLL_INTERVAL);
            }
        }
    }
}

/// Inner loop: drain one connection, dispatching each complete line.
///
/// A malformed line is logged and dropped without tearing the stream down;
/// any socket error drops only this connection.
fn read_loop(mut connection: TcpStream, dispatcher: &Dispatcher, stop: &AtomicBool) {
    let mut decoder = LineDecoder::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while !stop.load(Ordering::SeqCst) {
        match connection.read(&mut chunk) {
            Ok(0) => break,
            Ok(count) => {
                decoder.feed(&chunk[..count]);
                while let Some(parsed) = decoder.next_message() {
                    match parsed {
                        Ok(message) => dispatcher.dispatch(&message),
                        Err(e) => warn!("Dropping malformed line: {e}"),
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => sleep(READ_POLL_INTERVAL),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                warn!("Receiver read failed: {e}");
                break;
            }
        }
    }
}
