//! Error types for ui-orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Mode;

/// A screen failed inside one of its lifecycle methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        HandlerError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Invalid handler registration, caught when the registry is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No handler was registered for this mode.
    #[error("No handler registered for mode {0}")]
    Missing(Mode),

    /// More than one handler was registered for this mode.
    #[error("Mode {0} registered more than once")]
    Duplicate(Mode),

    /// The message mode must be able to display text.
    #[error("Message mode handler must be text-capable")]
    MessageNotTextCapable,
}

/// Why a mode switch did not complete cleanly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    /// A faded switch is still in flight.
    #[error("Cannot switch to {requested}: transition to {in_flight} in progress")]
    Busy { requested: Mode, in_flight: Mode },

    /// The new screen failed to show. The mode did change.
    #[error("Failed to show {mode}: {source}")]
    Handler {
        mode: Mode,
        #[source]
        source: HandlerError,
    },

    /// The orchestrator was dropped before the switch finished.
    #[error("Switch abandoned before completion")]
    Abandoned,
}

/// A screen failed during one-time setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to set up {mode}: {source}")]
pub struct SetupError {
    pub mode: Mode,
    #[source]
    pub source: HandlerError,
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Config directory not found")]
    NoDirFound,

    /// Failed to read the config file.
    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse config {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
