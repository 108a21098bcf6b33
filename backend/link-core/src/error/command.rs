use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors raised inside command handlers.
///
/// These never propagate past the dispatcher, which logs them with the
/// command name and handler identity and moves on to the next handler.
#[derive(Debug, ThisError)]
pub enum CommandError {
    /// The message payload failed typed validation at the dispatch boundary.
    #[error("Payload Error in '{command}': {message} {location}")]
    Payload {
        command: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// A field whose absence makes the operation meaningless was missing.
    #[error("Missing Field Error in '{command}': '{field}' {location}")]
    MissingField {
        command: &'static str,
        field: &'static str,
        location: ErrorLocation,
    },
}

impl CommandError {
    /// Wrap a payload-validation failure with the owning command's name.
    #[track_caller]
    pub fn payload(command: &'static str, error: impl std::fmt::Display) -> Self {
        CommandError::Payload {
            command,
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_field(command: &'static str, field: &'static str) -> Self {
        CommandError::MissingField {
            command,
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
