//! TCP transport for the link.
//!
//! One [`Receiver`] (inbound commands: a loopback listener with at most one
//! live connection, polled from a dedicated worker thread) and one
//! [`Sender`] (outbound events: a single lazily connected, fire-and-forget
//! client). Framing on both sides is newline-delimited JSON from
//! [`crate::protocol`].

mod receiver;
mod sender;

pub use receiver::{ACCEPT_POLL_INTERVAL, READ_POLL_INTERVAL, Receiver};
pub use sender::Sender;
