//! Wire protocol for the link: one UTF-8 JSON object per line.
//!
//! Both directions use identical framing - a compact JSON object terminated
//! by a single `\n`, with no length prefix, checksum, or compression. The
//! only asymmetry is payload convention: inbound objects carry a `command`
//! field, outbound objects carry an `event` field.
//!
//! Compact serialization escapes all control characters, so an encoded line
//! can never contain an embedded raw newline.

mod codec;
mod event;
mod message;

pub use codec::{LineDecoder, encode_line};
pub use event::Event;
pub use message::Message;
