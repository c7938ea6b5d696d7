use crate::message::{Command, Event, Message, MessageKind, Query, TypeKey};
use crate::pipeline::Pipeline;

/// Static configuration for one message type: its kind, the handler types
/// that process it, and the stages wrapped around them.
///
/// ```
/// use microbus::{Command, Message, Pipeline, Registration};
///
/// struct PlaceOrder;
/// impl Message for PlaceOrder {}
/// impl Command for PlaceOrder {}
///
/// struct PlaceOrderHandler;
///
/// let registration = Registration::command::<PlaceOrder>()
///     .handler::<PlaceOrderHandler>()
///     .with_pipeline(Pipeline::new());
/// assert_eq!(registration.handler_types().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    message_type: TypeKey,
    kind: MessageKind,
    handler_types: Vec<TypeKey>,
    pipeline: Pipeline,
}

impl Registration {
    pub fn new(message_type: TypeKey, kind: MessageKind) -> Self {
        Self {
            message_type,
            kind,
            handler_types: Vec::new(),
            pipeline: Pipeline::new(),
        }
    }

    pub fn command<C: Command>() -> Self {
        Self::new(TypeKey::of::<C>(), MessageKind::Command)
    }

    pub fn event<E: Event>() -> Self {
        Self::new(TypeKey::of::<E>(), MessageKind::Event)
    }

    pub fn query<Q: Query>() -> Self {
        Self::new(TypeKey::of::<Q>(), MessageKind::Query)
    }

    /// Registration for any message type under an explicit kind.
    pub fn of<M: Message>(kind: MessageKind) -> Self {
        Self::new(TypeKey::of::<M>(), kind)
    }

    /// Append handler type `H`.
    pub fn handler<H: 'static>(self) -> Self {
        self.handler_type(TypeKey::of::<H>())
    }

    pub fn handler_type(mut self, handler: TypeKey) -> Self {
        self.handler_types.push(handler);
        self
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub(crate) fn push_handler(&mut self, handler: TypeKey) {
        self.handler_types.push(handler);
    }

    pub(crate) fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    pub fn message_type(&self) -> TypeKey {
        self.message_type
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Handler types, in registration order.
    pub fn handler_types(&self) -> &[TypeKey] {
        &self.handler_types
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}
