//! Error types for the linking workflow.
//!
//! Session-level failures (`LinkError`) abort the requested transition and leave
//! the session untouched. Per-document write failures (`WriteError`) never
//! escape the committer; they are folded into the `LinkResult` instead.

use thiserror::Error;

use crate::linker::SessionState;

/// Linking operation result type.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Errors surfaced to the operator by a link session.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The requested action is not possible with the current configuration
    /// (no vehicles selected, nothing matched, invalid pattern...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The action is not valid in the session's current state
    #[error("Cannot {action} a session that is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    /// The document store or vehicle registry could not be queried
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl LinkError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid transition error.
    pub fn invalid_transition(action: &'static str, state: SessionState) -> Self {
        Self::InvalidTransition { action, state }
    }
}

/// A single document's link write was rejected by the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct WriteError {
    pub message: String,
}

impl WriteError {
    pub fn new(msg: impl Into<String>) -> Self {
        let message = msg.into();
        let message = if message.trim().is_empty() {
            "write rejected by document store".to_string()
        } else {
            message
        };
        Self { message }
    }
}

/// Query failures from the external stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
