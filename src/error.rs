use std::error::Error;
use std::fmt;

use crate::message::{MessageKind, TypeKey};

/// Error raised while resolving a handler chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No registration for the message and no fallback sink either.
    NoRegistration { message_type: TypeKey },
    /// A command or query registration produced zero or several handlers.
    MultiplicityViolation { message_type: TypeKey, count: usize },
    /// The message is registered under a different kind than requested.
    KindMismatch {
        message_type: TypeKey,
        registered: MessageKind,
        requested: MessageKind,
    },
    /// The activator has no way to build this handler or stage type.
    ActivationFailed { type_name: &'static str },
}

impl ResolveError {
    /// The message type the failed resolution was for, when known.
    pub fn message_type(&self) -> Option<TypeKey> {
        match self {
            ResolveError::NoRegistration { message_type }
            | ResolveError::MultiplicityViolation { message_type, .. }
            | ResolveError::KindMismatch { message_type, .. } => Some(*message_type),
            ResolveError::ActivationFailed { .. } => None,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NoRegistration { message_type } => write!(
                f,
                "no registration for message of type {} was found",
                message_type.short_name()
            ),
            ResolveError::MultiplicityViolation {
                message_type,
                count,
            } => write!(
                f,
                "message of type {} must resolve to exactly one handler (found {})",
                message_type.short_name(),
                count
            ),
            ResolveError::KindMismatch {
                message_type,
                registered,
                requested,
            } => write!(
                f,
                "message of type {} is registered as a {} but was requested as a {}",
                message_type.short_name(),
                registered,
                requested
            ),
            ResolveError::ActivationFailed { type_name } => {
                write!(f, "no factory registered for {}", type_name)
            }
        }
    }
}

impl Error for ResolveError {}

/// Error returned by a handler or pipeline stage when invoked.
#[derive(Debug)]
pub enum HandlerError {
    /// Business logic rejected the message.
    Rejected(String),
    /// The message had no registration; only the fallback sink was notified.
    NoMatchingRegistration(String),
    /// A stage passed a message of the wrong type to an inner handler.
    UnexpectedMessage { expected: &'static str },
    /// A stage returned a reply of the wrong type for a query.
    UnexpectedReply { expected: &'static str },
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::NoMatchingRegistration(name) => {
                write!(f, "no handler registered for {}", name)
            }
            HandlerError::UnexpectedMessage { expected } => {
                write!(f, "unexpected message in pipeline (expected {})", expected)
            }
            HandlerError::UnexpectedReply { expected } => {
                write!(f, "unexpected reply from pipeline (expected {})", expected)
            }
            HandlerError::Other(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<ResolveError> for HandlerError {
    fn from(err: ResolveError) -> Self {
        HandlerError::Other(Box::new(err))
    }
}
