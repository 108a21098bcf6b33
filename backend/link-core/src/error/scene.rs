use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors crossing the host-scene boundary.
#[derive(Debug, ThisError)]
pub enum SceneError {
    #[error("Unknown Group Error: {group} {location}")]
    UnknownGroup {
        group: String,
        location: ErrorLocation,
    },

    #[error("Import Read Error: {path}: {source} {location}")]
    ImportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Import Parse Error: {path}: {reason} {location}")]
    ImportParse {
        path: PathBuf,
        reason: String,
        location: ErrorLocation,
    },
}

impl SceneError {
    #[track_caller]
    pub fn unknown_group(group: impl Into<String>) -> Self {
        SceneError::UnknownGroup {
            group: group.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
