pub mod command;
pub mod config;
pub mod protocol;
pub mod scene;
pub mod transport;

use thiserror::Error;

/// Umbrella error for callers that wire the whole link together.
///
/// Individual modules return their own error enums; this type only exists
/// so application code can use one `?`-friendly error at the top level.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Transport(#[from] transport::TransportError),

    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    #[error(transparent)]
    Command(#[from] command::CommandError),

    #[error(transparent)]
    Scene(#[from] scene::SceneError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
