//! Error types.
//!
//! - [`ParamError`] – raised while binding textual parameters to an action
//! - [`ConfigurationError`] – content-authoring mistakes caught when a tween
//!   or actor command is configured (empty walk path, non-positive speed)
//! - [`SaveError`] – failures while writing or reading a world snapshot

use thiserror::Error;

use crate::actions::param::ParamType;

/// Failure while binding parameters to an action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A mandatory parameter was not supplied.
    #[error("action '{action}' is missing mandatory parameter '{param}'")]
    MissingParameter { action: String, param: String },

    /// A value could not be parsed into its declared kind.
    #[error("parameter '{param}' expects {kind:?}, got '{value}'")]
    InvalidValue {
        param: String,
        kind: ParamType,
        value: String,
    },

    /// A value is not in the declared option set.
    #[error("parameter '{param}' must be one of {options:?}, got '{value}'")]
    InvalidOption {
        param: String,
        value: String,
        options: Vec<String>,
    },

    /// No action is registered under this kind.
    #[error("unknown action kind '{0}'")]
    UnknownAction(String),
}

/// Content or programming error detected when configuring a tween or command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("walk path is empty")]
    EmptyPath,

    #[error("walk speed must be positive, got {0}")]
    InvalidSpeed(f32),

    #[error("entity {0} is not an actor")]
    NotAnActor(String),
}

/// Failure while persisting or restoring world state.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("snapshot json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot refers to a callback id nobody registered.
    #[error("snapshot refers to unregistered callback '{0}'")]
    UnknownCallback(String),
}
