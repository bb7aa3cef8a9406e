//! Error model.

use thiserror::Error;

use crate::id::HandlerId;

/// Result type returned by fallible dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatcher error.
///
/// Registration is the only fallible dispatcher operation; every other
/// operation is total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The same handler reference is already registered under this event name.
    /// The registry is left unchanged.
    #[error("handler {handler} is already registered for event `{event_name}`")]
    AlreadyRegistered {
        event_name: String,
        handler: HandlerId,
    },
}

impl DispatchError {
    pub fn already_registered(event_name: impl Into<String>, handler: HandlerId) -> Self {
        Self::AlreadyRegistered {
            event_name: event_name.into(),
            handler,
        }
    }

    /// Event name the failed operation targeted.
    pub fn event_name(&self) -> &str {
        match self {
            Self::AlreadyRegistered { event_name, .. } => event_name,
        }
    }
}

/// Failures of value parsing outside the dispatch path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
