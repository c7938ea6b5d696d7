//! Handler traits - one per message kind.
//!
//! Handlers borrow the message. Commands and queries have exactly one
//! handler; events fan out to every registered handler through
//! `MulticastEventHandler`.
//!
//! Closures implement the traits directly:
//!
//! ```
//! use microbus::{Command, CommandHandler, HandlerError, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//! impl Command for Ping {}
//!
//! let handler = |_: &Ping| -> Result<(), HandlerError> { Ok(()) };
//! assert!(CommandHandler::handle(&handler, &Ping).is_ok());
//! ```

mod multicast;

pub use multicast::MulticastEventHandler;

use crate::error::HandlerError;
use crate::message::{Command, Event, Query};

/// Handles a single command type.
pub trait CommandHandler<C: Command>: Send + Sync {
    fn handle(&self, command: &C) -> Result<(), HandlerError>;
}

/// Handles a single event type. Any number of these may exist per event.
pub trait EventHandler<E: Event>: Send + Sync {
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}

/// Handles a single query type, producing its result.
pub trait QueryHandler<Q: Query>: Send + Sync {
    fn handle(&self, query: &Q) -> Result<Q::Result, HandlerError>;
}

impl<C, F> CommandHandler<C> for F
where
    C: Command,
    F: Fn(&C) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, command: &C) -> Result<(), HandlerError> {
        self(command)
    }
}

impl<E, F> EventHandler<E> for F
where
    E: Event,
    F: Fn(&E) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        self(event)
    }
}

impl<Q, F> QueryHandler<Q> for F
where
    Q: Query,
    F: Fn(&Q) -> Result<Q::Result, HandlerError> + Send + Sync,
{
    fn handle(&self, query: &Q) -> Result<Q::Result, HandlerError> {
        self(query)
    }
}
