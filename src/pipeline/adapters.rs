//! Shape adapters between kind-specific handlers and `PipelineHandler`.
//!
//! `*Stage` types sit at the bottom of a pipeline and turn a command, event
//! or query handler into a stage. `Pipeline*Handler` types sit on top and
//! present the composed pipeline in the shape the caller asked for.

use std::any::type_name;
use std::marker::PhantomData;

use super::{Envelope, PipelineHandler, Reply};
use crate::error::HandlerError;
use crate::handler::{CommandHandler, EventHandler, QueryHandler};
use crate::message::{Command, Event, MessageKind, Query};

fn unexpected<M>() -> HandlerError {
    HandlerError::UnexpectedMessage {
        expected: type_name::<M>(),
    }
}

pub struct CommandStage<C: Command> {
    handler: Box<dyn CommandHandler<C>>,
}

impl<C: Command> CommandStage<C> {
    pub fn new(handler: Box<dyn CommandHandler<C>>) -> Self {
        Self { handler }
    }
}

impl<C: Command> PipelineHandler for CommandStage<C> {
    fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
        let command = envelope.downcast_ref::<C>().ok_or_else(unexpected::<C>)?;
        self.handler.handle(command)?;
        Ok(Box::new(()))
    }
}

pub struct EventStage<E: Event> {
    handler: Box<dyn EventHandler<E>>,
}

impl<E: Event> EventStage<E> {
    pub fn new(handler: Box<dyn EventHandler<E>>) -> Self {
        Self { handler }
    }
}

impl<E: Event> PipelineHandler for EventStage<E> {
    fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
        let event = envelope.downcast_ref::<E>().ok_or_else(unexpected::<E>)?;
        self.handler.handle(event)?;
        Ok(Box::new(()))
    }
}

pub struct QueryStage<Q: Query> {
    handler: Box<dyn QueryHandler<Q>>,
}

impl<Q: Query> QueryStage<Q> {
    pub fn new(handler: Box<dyn QueryHandler<Q>>) -> Self {
        Self { handler }
    }
}

impl<Q: Query> PipelineHandler for QueryStage<Q> {
    fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
        let query = envelope.downcast_ref::<Q>().ok_or_else(unexpected::<Q>)?;
        let result = self.handler.handle(query)?;
        Ok(Box::new(result))
    }
}

/// A composed pipeline presented as a command handler.
pub struct PipelineCommandHandler<C: Command> {
    pipeline: Box<dyn PipelineHandler>,
    _message: PhantomData<fn(&C)>,
}

impl<C: Command> PipelineCommandHandler<C> {
    pub fn new(pipeline: Box<dyn PipelineHandler>) -> Self {
        Self {
            pipeline,
            _message: PhantomData,
        }
    }
}

impl<C: Command> CommandHandler<C> for PipelineCommandHandler<C> {
    fn handle(&self, command: &C) -> Result<(), HandlerError> {
        self.pipeline
            .handle(&Envelope::new(MessageKind::Command, command))
            .map(drop)
    }
}

/// A composed pipeline presented as an event handler.
pub struct PipelineEventHandler<E: Event> {
    pipeline: Box<dyn PipelineHandler>,
    _message: PhantomData<fn(&E)>,
}

impl<E: Event> PipelineEventHandler<E> {
    pub fn new(pipeline: Box<dyn PipelineHandler>) -> Self {
        Self {
            pipeline,
            _message: PhantomData,
        }
    }
}

impl<E: Event> EventHandler<E> for PipelineEventHandler<E> {
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        self.pipeline
            .handle(&Envelope::new(MessageKind::Event, event))
            .map(drop)
    }
}

/// A composed pipeline presented as a query handler.
///
/// The reply coming out of the outermost stage must be a `Q::Result`; a
/// stage that short-circuits with anything else yields
/// `HandlerError::UnexpectedReply`.
pub struct PipelineQueryHandler<Q: Query> {
    pipeline: Box<dyn PipelineHandler>,
    _message: PhantomData<fn(&Q)>,
}

impl<Q: Query> PipelineQueryHandler<Q> {
    pub fn new(pipeline: Box<dyn PipelineHandler>) -> Self {
        Self {
            pipeline,
            _message: PhantomData,
        }
    }
}

impl<Q: Query> QueryHandler<Q> for PipelineQueryHandler<Q> {
    fn handle(&self, query: &Q) -> Result<Q::Result, HandlerError> {
        let reply = self
            .pipeline
            .handle(&Envelope::new(MessageKind::Query, query))?;
        reply
            .downcast::<Q::Result>()
            .map(|result| *result)
            .map_err(|_| HandlerError::UnexpectedReply {
                expected: type_name::<Q::Result>(),
            })
    }
}
