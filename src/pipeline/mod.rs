//! Pipeline stages - middleware wrapped around a resolved handler.
//!
//! Every stage implements the same capability, `PipelineHandler`, whatever
//! kind of message flows through it. A stage owns the next handler inward
//! and decides whether (and when) to delegate to it:
//!
//! ```
//! use microbus::{Envelope, HandlerError, PipelineHandler, Reply};
//!
//! struct Timing {
//!     inner: Box<dyn PipelineHandler>,
//! }
//!
//! impl PipelineHandler for Timing {
//!     fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
//!         let started = std::time::Instant::now();
//!         let reply = self.inner.handle(envelope);
//!         let _elapsed = started.elapsed();
//!         reply
//!     }
//! }
//! ```
//!
//! Stages are listed innermost first: for `[A, B, C]` a call enters `C`,
//! then `B`, then `A`, then the handler.

mod adapters;

pub use adapters::{
    CommandStage, EventStage, PipelineCommandHandler, PipelineEventHandler, PipelineQueryHandler,
    QueryStage,
};

use std::any::Any;

use crate::activator::HandlerActivator;
use crate::error::{HandlerError, ResolveError};
use crate::message::{Message, MessageKind, TypeKey};

/// Value returned through a pipeline: `()` for commands and events, the
/// query result for queries.
pub type Reply = Box<dyn Any + Send>;

/// The message as seen by a pipeline stage.
#[derive(Clone, Copy)]
pub struct Envelope<'a> {
    message_type: TypeKey,
    kind: MessageKind,
    message: &'a dyn Any,
}

impl<'a> Envelope<'a> {
    pub fn new<M: Message>(kind: MessageKind, message: &'a M) -> Self {
        Self {
            message_type: TypeKey::of::<M>(),
            kind,
            message,
        }
    }

    pub fn message_type(&self) -> TypeKey {
        self.message_type
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn message(&self) -> &'a dyn Any {
        self.message
    }

    /// Borrow the message as `M`, if that is its type.
    pub fn downcast_ref<M: Message>(&self) -> Option<&'a M> {
        self.message.downcast_ref::<M>()
    }
}

/// A uniformly shaped handler: the capability every pipeline stage and
/// every shape adapter implements.
pub trait PipelineHandler: Send + Sync {
    fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError>;
}

/// Ordered list of stage types to wrap around a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<TypeKey>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append stage type `S`. Later stages wrap earlier ones.
    pub fn then<S: PipelineHandler + 'static>(self) -> Self {
        self.stage(TypeKey::of::<S>())
    }

    /// Append a stage by key.
    pub fn stage(mut self, stage: TypeKey) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[TypeKey] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Fold `pipeline` around `inner`, first stage innermost.
pub fn compose<A: HandlerActivator>(
    activator: &A,
    pipeline: &Pipeline,
    inner: Box<dyn PipelineHandler>,
) -> Result<Box<dyn PipelineHandler>, ResolveError> {
    pipeline.stages().iter().try_fold(inner, |current, stage| {
        tracing::debug!(stage = stage.name(), "activating pipeline stage");
        activator.activate_stage(stage, current)
    })
}
