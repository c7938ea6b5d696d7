//! Handlers standing in for a message type that has no registration.
//!
//! Each one holds the resolved `NoMatchingRegistrationEvent` handler. They
//! do not do the missing handler's work: invoking one only notifies the
//! fallback sink about the unhandled message. Commands and events then
//! report success; a query has no result to give and reports
//! `HandlerError::NoMatchingRegistration` after notifying.

use std::marker::PhantomData;

use crate::error::HandlerError;
use crate::handler::{CommandHandler, EventHandler, QueryHandler};
use crate::message::{Command, Event, Message, MessageKind, NoMatchingRegistrationEvent, Query, TypeKey};

type FallbackSink = Box<dyn EventHandler<NoMatchingRegistrationEvent>>;

fn notify<M: Message>(sink: &FallbackSink, kind: MessageKind) -> Result<(), HandlerError> {
    sink.handle(&NoMatchingRegistrationEvent::for_message::<M>(kind))
}

pub struct FallbackCommandHandler<C: Command> {
    sink: FallbackSink,
    _message: PhantomData<fn(&C)>,
}

impl<C: Command> FallbackCommandHandler<C> {
    pub fn new(sink: FallbackSink) -> Self {
        Self {
            sink,
            _message: PhantomData,
        }
    }
}

impl<C: Command> CommandHandler<C> for FallbackCommandHandler<C> {
    fn handle(&self, _command: &C) -> Result<(), HandlerError> {
        notify::<C>(&self.sink, MessageKind::Command)
    }
}

pub struct FallbackEventHandler<E: Event> {
    sink: FallbackSink,
    _message: PhantomData<fn(&E)>,
}

impl<E: Event> FallbackEventHandler<E> {
    pub fn new(sink: FallbackSink) -> Self {
        Self {
            sink,
            _message: PhantomData,
        }
    }
}

impl<E: Event> EventHandler<E> for FallbackEventHandler<E> {
    fn handle(&self, _event: &E) -> Result<(), HandlerError> {
        notify::<E>(&self.sink, MessageKind::Event)
    }
}

pub struct FallbackQueryHandler<Q: Query> {
    sink: FallbackSink,
    _message: PhantomData<fn(&Q)>,
}

impl<Q: Query> FallbackQueryHandler<Q> {
    pub fn new(sink: FallbackSink) -> Self {
        Self {
            sink,
            _message: PhantomData,
        }
    }
}

impl<Q: Query> QueryHandler<Q> for FallbackQueryHandler<Q> {
    fn handle(&self, _query: &Q) -> Result<Q::Result, HandlerError> {
        notify::<Q>(&self.sink, MessageKind::Query)?;
        Err(HandlerError::NoMatchingRegistration(
            TypeKey::of::<Q>().short_name().to_string(),
        ))
    }
}
