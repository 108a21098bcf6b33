use crate::error::protocol::ProtocolError;

use common::ErrorLocation;

use std::panic::Location;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One parsed inbound wire message.
///
/// A message is a JSON object routed by its `command` field; the remaining
/// fields are command-specific payload. It is immutable once parsed and
/// owned by the dispatch call that parsed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    fields: Map<String, Value>,
}

impl Message {
    /// Parse one complete line of JSON into a message.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Decode`] if the line is not valid JSON or
    /// not a JSON object.
    #[track_caller]
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(line).map_err(|e| ProtocolError::Decode {
            message: format!("Malformed JSON line: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Decode`] if the value is not a JSON object.
    #[track_caller]
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ProtocolError::Decode {
                message: format!("Expected JSON object, got {other}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// The routing key, if present and a string.
    pub fn command(&self) -> Option<&str> {
        self.fields.get("command").and_then(Value::as_str)
    }

    /// Deserialize the whole message into a typed per-command payload.
    ///
    /// Handlers call this exactly once at the dispatch boundary instead of
    /// poking at raw JSON fields.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Payload`] if the fields do not match `T`.
    #[track_caller]
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            ProtocolError::Payload {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// The raw fields as a JSON value (used by tests and logging).
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
