use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors raised by the socket layer.
///
/// Only `Bind` and `Spawn` ever reach a caller: a receiver that cannot bind
/// does not start, and the condition is surfaced once with no retry. Every
/// per-connection failure is absorbed inside the transport loops and logged.
#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Bind Error: {address}: {message} {location}")]
    Bind {
        address: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Address Error: {address}: {message} {location}")]
    Address {
        address: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Worker Spawn Error: {message} {location}")]
    Spawn {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },
}

impl From<IoError> for TransportError {
    #[track_caller]
    fn from(error: IoError) -> Self {
        TransportError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
