use common::ErrorLocation;

use thiserror::Error;

/// Errors that can occur while bootstrapping the reference host.
///
/// Startup is the only fallible phase; once the main loop is running, every
/// failure is logged and absorbed inside link-core instead of surfacing here.
#[derive(Debug, Error)]
pub enum PathviewError {
    /// Error from this app (directories, logging, environment)
    #[error("Pathview Error: {message} {location}")]
    Pathview {
        message: String,
        location: ErrorLocation,
    },

    /// Link configuration failed to load or validate
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// The link transport failed to start
    #[error("Link Error: {message} {location}")]
    Link {
        message: String,
        location: ErrorLocation,
    },
}
