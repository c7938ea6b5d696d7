//! microbus - the handler resolution core of an in-process mediator.
//!
//! Given a message type, `HandlerBuilder` finds its registration, activates
//! the handler(s), wraps them in the configured pipeline and returns one
//! callable in the shape the caller expects. Messages with no registration
//! are routed to a `NoMatchingRegistrationEvent` handler when one exists.
//!
//! ```
//! use microbus::{
//!     Envelope, Event, EventHandler, FactoryActivator, HandlerBuilder, HandlerError,
//!     InMemoryRegistry, Message, Pipeline, PipelineHandler, Reply,
//! };
//!
//! struct OrderShipped;
//! impl Message for OrderShipped {}
//! impl Event for OrderShipped {}
//!
//! struct NotifyCustomer;
//! impl EventHandler<OrderShipped> for NotifyCustomer {
//!     fn handle(&self, _: &OrderShipped) -> Result<(), HandlerError> {
//!         Ok(())
//!     }
//! }
//!
//! struct Audit {
//!     inner: Box<dyn PipelineHandler>,
//! }
//! impl PipelineHandler for Audit {
//!     fn handle(&self, envelope: &Envelope<'_>) -> Result<Reply, HandlerError> {
//!         self.inner.handle(envelope)
//!     }
//! }
//!
//! let builder = HandlerBuilder::new(
//!     InMemoryRegistry::new()
//!         .event_with::<OrderShipped, NotifyCustomer>(Pipeline::new().then::<Audit>()),
//!     FactoryActivator::new()
//!         .event::<OrderShipped, NotifyCustomer, _>(|| NotifyCustomer)
//!         .stage::<Audit, _>(|inner| Audit { inner }),
//! );
//!
//! let handler = builder.resolve_event_handler::<OrderShipped>().unwrap();
//! handler.handle(&OrderShipped).unwrap();
//! ```

mod activator;
mod error;
mod handler;
mod message;
mod pipeline;
mod registry;
mod resolver;

pub use activator::{FactoryActivator, HandlerActivator};
pub use error::{HandlerError, ResolveError};
pub use handler::{CommandHandler, EventHandler, MulticastEventHandler, QueryHandler};
pub use message::{Command, Event, Message, MessageKind, NoMatchingRegistrationEvent, Query, TypeKey};
pub use pipeline::{
    compose, CommandStage, Envelope, EventStage, Pipeline, PipelineCommandHandler, PipelineEventHandler,
    PipelineHandler, PipelineQueryHandler, QueryStage, Reply,
};
#[cfg(feature = "serde")]
pub use registry::RegistrationSummary;
pub use registry::{InMemoryRegistry, Registration, Registry};
pub use resolver::{
    CommandResolution, EventResolution, FallbackCommandHandler, FallbackEventHandler, FallbackQueryHandler,
    HandlerBuilder, QueryResolution, Resolution,
};
