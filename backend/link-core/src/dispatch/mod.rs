//! Command dispatch.
//!
//! Maps a command name to an ordered list of handlers. Registration happens
//! once during an explicit startup phase, before the receiver starts; the
//! table is read-only afterwards (the dispatcher is frozen behind an `Arc`
//! handed to the receiver).
//!
//! Dispatch is a synchronous, single-threaded fan-out on the receiver's
//! worker thread. Handler failures - `Err` returns and panics alike - are
//! contained at this boundary: logged with the command name and handler
//! identity, never allowed to stop sibling handlers or the read loop.

use crate::error::command::CommandError;
use crate::protocol::Message;

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use log::{error, info, warn};

/// One registered command handler.
///
/// `handle` runs on the receiver thread. It must validate its typed payload
/// once, then submit any host-state work through the deferred bridge - it
/// must never touch host state directly.
pub trait CommandHandler: Send + Sync {
    /// Stable identity used in dispatch logs.
    fn name(&self) -> &'static str;

    fn handle(&self, message: &Message) -> Result<(), CommandError>;
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Vec<Arc<dyn CommandHandler>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the ordered list for `command`.
    ///
    /// Multiple registrations accumulate; dispatch invokes them all in
    /// registration order.
    pub fn register(&mut self, command: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.entry(command.into()).or_default().push(handler);
    }

    /// Route one message to every handler registered for its command.
    ///
    /// A message without a `command` string and a command without handlers
    /// are both non-fatal no-ops; unknown commands are expected during
    /// protocol evolution.
    pub fn dispatch(&self, message: &Message) {
        let Some(command) = message.command() else {
            warn!("Dropping message without a command field");
            return;
        };

        let Some(handlers) = self.handlers.get(command) else {
            info!("No handlers registered for '{command}'");
            return;
        };

        for handler in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler.handle(message))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!("Handler '{}' failed for '{command}': {e}", handler.name());
                }
                Err(_) => {
                    error!("Handler '{}' panicked for '{command}'", handler.name());
                }
            }
        }
    }

    /// Number of handlers registered for a command.
    pub fn handler_count(&self, command: &str) -> usize {
        self.handlers.get(command).map_or(0, Vec::len)
    }
}
