//! Core library for the SeeLink companion-process link.
//!
//! A 3D host application embeds this crate to exchange newline-delimited
//! JSON commands and events with an external visualization process over
//! local TCP. The pieces:
//!
//! - [`protocol`] - line framing and typed message/event payloads
//! - [`transport`] - the inbound [`transport::Receiver`] (one listener, one
//!   live connection) and outbound [`transport::Sender`] (one lazy,
//!   fire-and-forget connection)
//! - [`dispatch`] - routes inbound commands to registered handlers
//! - [`schedule`] - the deferred main-thread bridge; the only path by which
//!   network-thread work may touch host state
//! - [`scene`] - the boundary trait to the host's scene graph
//! - [`commands`] - the path-viewer command handlers
//! - [`tracker`] - the periodic cursor sampling loop
//!
//! # Threading contract
//!
//! Host state is mutated exclusively from the host's cooperative main loop.
//! The receiver worker parses and dispatches on its own thread; handlers
//! translate payloads into closures submitted through
//! [`schedule::MainLoopHandle`], which the host drains with
//! [`schedule::MainLoop::tick`]. Nothing in this crate escalates a failure
//! into crashing the host process.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod scene;
pub mod schedule;
pub mod tracker;
pub mod transport;

#[cfg(test)]
mod tests;

/// The link is loopback-only; neither side is ever exposed on a network.
pub const LINK_HOSTNAME: &str = "127.0.0.1";

/// Port the receiver listens on for inbound commands.
pub const DEFAULT_COMMAND_PORT: u16 = 5051;

/// Port the sender connects to for outbound events.
pub const DEFAULT_EVENT_PORT: u16 = 5052;
