//! Outbound event sender.
//!
//! Holds at most one connection to the visualization process, established
//! lazily on the first send and discarded on any connect or write failure.
//! Delivery is fire-and-forget: failures are logged and swallowed, and the
//! next send transparently attempts to reconnect. This trades delivery
//! guarantees for host liveness, matching the peer's best-effort contract.

use crate::protocol::encode_line;

use std::io::Write;
use std::net::TcpStream;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};
use serde::Serialize;

/// TCP client for outbound events.
///
/// Clones share one connection slot behind a mutex; `send` may be called
/// concurrently from the main loop and the cursor tracker's deferred jobs
/// without a torn connection state.
#[derive(Clone)]
pub struct Sender {
    address: String,
    connection: Arc<Mutex<Option<TcpStream>>>,
}

impl Sender {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connection: Arc::new(Mutex::new(None)),
        }
    }

    /// Serialize and write one message line, connecting first if needed.
    ///
    /// Never returns an error: an unreachable peer or a dead connection is
    /// logged, the connection slot is cleared, and the call becomes a
    /// no-op. The caller is not told about delivery failure.
    pub fn send<T: Serialize>(&self, message: &T) {
        let line = match encode_line(message) {
            Ok(line) => line,
            Err(e) => {
                warn!("Sender dropped unencodable message: {e}");
                return;
            }
        };

        let mut slot = self.lock_connection();

        if slot.is_none() {
            match TcpStream::connect(&self.address) {
                Ok(connection) => {
                    info!("Sender connected to {}", self.address);
                    *slot = Some(connection);
                }
                Err(e) => {
                    warn!("Sender connect to {} failed: {e}", self.address);
                    return;
                }
            }
        }

        if let Some(connection) = slot.as_mut() {
            if let Err(e) = connection.write_all(&line) {
                warn!("Sender write failed, dropping connection: {e}");
                *slot = None;
            }
        }
    }

    /// Whether a connection is currently held (it may still be dead; the
    /// next write is what detects that).
    pub fn is_connected(&self) -> bool {
        self.lock_connection().is_some()
    }

    /// Drop the current connection; the next `send` reconnects lazily.
    pub fn disconnect(&self) {
        *self.lock_connection() = None;
    }

    fn lock_connection(&self) -> MutexGuard<'_, Option<TcpStream>> {
        match self.connection.lock() {
            Ok(guard) => guard,
            // A panic while holding the lock cannot corrupt an Option swap.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
