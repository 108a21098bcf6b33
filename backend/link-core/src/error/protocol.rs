use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Errors in the line-framed JSON wire format.
///
/// A `Decode` error condemns exactly one line; the connection that produced
/// it stays up and the decoder moves on to the next line.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Payload Error: {message} {location}")]
    Payload {
        message: String,
        location: ErrorLocation,
    },
}
