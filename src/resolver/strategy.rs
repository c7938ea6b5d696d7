//! Per-kind resolution strategies.
//!
//! The resolution algorithm is written once, in `HandlerBuilder::resolve`.
//! What differs between commands, events and queries (how activated
//! handlers merge, and how the handler shape converts to and from a
//! pipeline stage) lives in a `Resolution` implementation.

use std::marker::PhantomData;

use super::fallback::{FallbackCommandHandler, FallbackEventHandler, FallbackQueryHandler};
use crate::error::ResolveError;
use crate::handler::{CommandHandler, EventHandler, MulticastEventHandler, QueryHandler};
use crate::message::{Command, Event, Message, MessageKind, NoMatchingRegistrationEvent, Query, TypeKey};
use crate::pipeline::{
    CommandStage, EventStage, PipelineCommandHandler, PipelineEventHandler, PipelineHandler,
    PipelineQueryHandler, QueryStage,
};

/// How one message kind is resolved.
pub trait Resolution {
    type Message: Message;
    /// The handler shape handed back to the caller.
    type Handler: 'static;

    const KIND: MessageKind;

    /// Collapse the activated handlers into one.
    fn merge(message_type: TypeKey, handlers: Vec<Self::Handler>) -> Result<Self::Handler, ResolveError>;

    /// Present the merged handler as the innermost pipeline stage.
    fn into_stage(handler: Self::Handler) -> Box<dyn PipelineHandler>;

    /// Present the outermost pipeline stage in the caller's shape.
    fn from_stage(stage: Box<dyn PipelineHandler>) -> Self::Handler;

    /// Present the fallback sink in the caller's shape.
    fn from_fallback(fallback: Box<dyn EventHandler<NoMatchingRegistrationEvent>>) -> Self::Handler;
}

/// Exactly one handler; zero or many is a configuration error.
fn single<H>(message_type: TypeKey, mut handlers: Vec<H>) -> Result<H, ResolveError> {
    let count = handlers.len();
    match handlers.pop() {
        Some(handler) if count == 1 => Ok(handler),
        _ => Err(ResolveError::MultiplicityViolation {
            message_type,
            count,
        }),
    }
}

pub struct CommandResolution<C>(PhantomData<fn(&C)>);

impl<C: Command> Resolution for CommandResolution<C> {
    type Message = C;
    type Handler = Box<dyn CommandHandler<C>>;

    const KIND: MessageKind = MessageKind::Command;

    fn merge(message_type: TypeKey, handlers: Vec<Self::Handler>) -> Result<Self::Handler, ResolveError> {
        single(message_type, handlers)
    }

    fn into_stage(handler: Self::Handler) -> Box<dyn PipelineHandler> {
        Box::new(CommandStage::new(handler))
    }

    fn from_stage(stage: Box<dyn PipelineHandler>) -> Self::Handler {
        Box::new(PipelineCommandHandler::new(stage))
    }

    fn from_fallback(fallback: Box<dyn EventHandler<NoMatchingRegistrationEvent>>) -> Self::Handler {
        Box::new(FallbackCommandHandler::new(fallback))
    }
}

pub struct EventResolution<E>(PhantomData<fn(&E)>);

impl<E: Event> Resolution for EventResolution<E> {
    type Message = E;
    type Handler = Box<dyn EventHandler<E>>;

    const KIND: MessageKind = MessageKind::Event;

    fn merge(_message_type: TypeKey, handlers: Vec<Self::Handler>) -> Result<Self::Handler, ResolveError> {
        Ok(Box::new(MulticastEventHandler::new(handlers)))
    }

    fn into_stage(handler: Self::Handler) -> Box<dyn PipelineHandler> {
        Box::new(EventStage::new(handler))
    }

    fn from_stage(stage: Box<dyn PipelineHandler>) -> Self::Handler {
        Box::new(PipelineEventHandler::new(stage))
    }

    fn from_fallback(fallback: Box<dyn EventHandler<NoMatchingRegistrationEvent>>) -> Self::Handler {
        Box::new(FallbackEventHandler::new(fallback))
    }
}

pub struct QueryResolution<Q>(PhantomData<fn(&Q)>);

impl<Q: Query> Resolution for QueryResolution<Q> {
    type Message = Q;
    type Handler = Box<dyn QueryHandler<Q>>;

    const KIND: MessageKind = MessageKind::Query;

    fn merge(message_type: TypeKey, handlers: Vec<Self::Handler>) -> Result<Self::Handler, ResolveError> {
        single(message_type, handlers)
    }

    fn into_stage(handler: Self::Handler) -> Box<dyn PipelineHandler> {
        Box::new(QueryStage::new(handler))
    }

    fn from_stage(stage: Box<dyn PipelineHandler>) -> Self::Handler {
        Box::new(PipelineQueryHandler::new(stage))
    }

    fn from_fallback(fallback: Box<dyn EventHandler<NoMatchingRegistrationEvent>>) -> Self::Handler {
        Box::new(FallbackQueryHandler::new(fallback))
    }
}
